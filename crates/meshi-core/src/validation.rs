//! Field-level validation shared by the API and CLI.
//!
//! Errors are collected per field rather than stopping at the first failure,
//! so a form can highlight every problem in one round trip.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Substrings that mark a URL as a Google Maps link.
pub const GOOGLE_MAPS_URL_PATTERNS: &[&str] = &["google.com/maps", "goo.gl/maps", "maps.app.goo.gl"];

/// Upper bound for a single uploaded image.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types, paired with the file extension used for storage keys.
pub const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

static STRICT_MAPS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://((www\.)?google\.com/maps/|goo\.gl/maps/|maps\.app\.goo\.gl/)")
        .expect("valid maps url regex")
});

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, empty if the field passed.
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[][..], Vec::as_slice)
    }

    /// `Ok(value)` when no errors were recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed validation.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Loose Google Maps check: the URL contains one of the known map hosts.
#[must_use]
pub fn is_google_maps_url(url: &str) -> bool {
    GOOGLE_MAPS_URL_PATTERNS.iter().any(|p| url.contains(p))
}

/// Strict Google Maps check anchored on scheme and host.
#[must_use]
pub fn is_google_maps_url_strict(url: &str) -> bool {
    STRICT_MAPS_URL.is_match(url)
}

/// Returns `true` if `value` parses as an absolute URL.
#[must_use]
pub fn is_absolute_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// An image that passed upload validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageUpload {
    pub content_type: &'static str,
    pub extension: &'static str,
}

/// File extension for an accepted image MIME type.
#[must_use]
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let normalized = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == normalized)
        .map(|(_, ext)| *ext)
}

/// Validate a single image upload against size, type, and per-place count limits.
///
/// `existing_count` is the number of photos the caller already holds for the place.
///
/// # Errors
///
/// Returns [`ValidationErrors`] keyed under `file` (size/type) and `photos` (count).
pub fn validate_image_upload(
    size_bytes: usize,
    content_type: &str,
    existing_count: usize,
) -> Result<ImageUpload, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if existing_count >= crate::places::PHOTOS_MAX_COUNT {
        errors.add(
            "photos",
            format!(
                "at most {} images can be uploaded",
                crate::places::PHOTOS_MAX_COUNT
            ),
        );
    }
    if size_bytes == 0 {
        errors.add("file", "file is empty");
    } else if size_bytes > MAX_IMAGE_BYTES {
        errors.add("file", "file size must be 5MB or less");
    }

    let accepted = image_extension(content_type)
        .and_then(|ext| ALLOWED_IMAGE_TYPES.iter().find(|(_, e)| *e == ext));
    match accepted {
        Some(&(mime, ext)) => errors.into_result(ImageUpload {
            content_type: mime,
            extension: ext,
        }),
        None => {
            errors.add("file", "only JPEG, PNG, and WebP images can be uploaded");
            Err(errors)
        }
    }
}
