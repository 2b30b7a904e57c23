//! Place domain types and the post-form validation rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{is_absolute_url, is_google_maps_url, ValidationErrors};

pub const NAME_MAX_LENGTH: usize = 200;
pub const ADDRESS_MAX_LENGTH: usize = 500;
pub const DESCRIPTION_MAX_LENGTH: usize = 2000;
pub const GENRES_MAX_COUNT: usize = 3;
pub const PHOTOS_MAX_COUNT: usize = 5;
pub const PRICE_RANGE_MIN: i16 = 1;
pub const PRICE_RANGE_MAX: i16 = 3;

/// Maximum number of name-similarity candidates a duplicate check reports.
pub const DUPLICATE_NAME_MATCH_LIMIT: i64 = 5;

/// The identifying triple of a stored place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: Uuid,
    pub name: String,
    pub map_url: String,
}

/// Outcome of a duplicate check for a candidate place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCheckResult {
    pub has_duplicate: bool,
    pub duplicates: Vec<PlaceSummary>,
}

impl DuplicateCheckResult {
    /// Merge exact map-link matches with name matches, keyed by place id.
    ///
    /// Exact matches come first. When an id appears in both lists only the
    /// exact-match occurrence is kept.
    #[must_use]
    pub fn merge(exact: Vec<PlaceSummary>, similar: Vec<PlaceSummary>) -> Self {
        let mut seen = HashSet::with_capacity(exact.len() + similar.len());
        let duplicates: Vec<PlaceSummary> = exact
            .into_iter()
            .chain(similar)
            .filter(|place| seen.insert(place.id))
            .collect();

        Self {
            has_duplicate: !duplicates.is_empty(),
            duplicates,
        }
    }
}

/// Raw place post as submitted by the form.
///
/// Every field defaults so that missing fields surface as validation
/// messages rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlacePostInput {
    pub place_id: String,
    pub name: String,
    pub map_url: String,
    pub address: String,
    pub genres: Vec<String>,
    pub price_range: Option<i16>,
    pub description: Option<String>,
    pub photos: Vec<String>,
}

/// A validated place ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlace {
    pub place_id: String,
    pub name: String,
    pub map_url: String,
    pub address: String,
    pub genres: Vec<String>,
    pub price_range: Option<i16>,
    pub description: Option<String>,
    pub photos: Vec<String>,
    pub created_by: Uuid,
}

impl PlacePostInput {
    /// Trim and validate the input, attributing it to `created_by`.
    ///
    /// # Errors
    ///
    /// Returns every failing field in one [`ValidationErrors`].
    pub fn validate(self, created_by: Uuid) -> Result<NewPlace, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let place_id = self.place_id.trim().to_owned();
        if place_id.is_empty() {
            errors.add("place_id", "place id is required");
        }

        let name = self.name.trim().to_owned();
        if name.is_empty() {
            errors.add("name", "name is required");
        } else if name.chars().count() > NAME_MAX_LENGTH {
            errors.add(
                "name",
                format!("name must be {NAME_MAX_LENGTH} characters or fewer"),
            );
        }

        let map_url = self.map_url.trim().to_owned();
        if map_url.is_empty() {
            errors.add("map_url", "Google Maps URL is required");
        } else if !is_absolute_url(&map_url) {
            errors.add("map_url", "map_url must be a valid URL");
        } else if !is_google_maps_url(&map_url) {
            errors.add("map_url", "map_url must be a Google Maps URL");
        }

        let address = self.address.trim().to_owned();
        if address.is_empty() {
            errors.add("address", "address is required");
        } else if address.chars().count() > ADDRESS_MAX_LENGTH {
            errors.add(
                "address",
                format!("address must be {ADDRESS_MAX_LENGTH} characters or fewer"),
            );
        }

        if self.genres.len() > GENRES_MAX_COUNT {
            errors.add(
                "genres",
                format!("at most {GENRES_MAX_COUNT} genres can be selected"),
            );
        }

        if let Some(price_range) = self.price_range {
            if !(PRICE_RANGE_MIN..=PRICE_RANGE_MAX).contains(&price_range) {
                errors.add(
                    "price_range",
                    format!("price range must be between {PRICE_RANGE_MIN} and {PRICE_RANGE_MAX}"),
                );
            }
        }

        let description = self
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        if description
            .as_ref()
            .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LENGTH)
        {
            errors.add(
                "description",
                format!("description must be {DESCRIPTION_MAX_LENGTH} characters or fewer"),
            );
        }

        if self.photos.len() > PHOTOS_MAX_COUNT {
            errors.add(
                "photos",
                format!("at most {PHOTOS_MAX_COUNT} images can be uploaded"),
            );
        }
        for photo in &self.photos {
            if !is_absolute_url(photo) {
                errors.add("photos", format!("'{photo}' is not a valid URL"));
            }
        }

        errors.into_result(NewPlace {
            place_id,
            name,
            map_url,
            address,
            genres: self.genres,
            price_range: self.price_range,
            description,
            photos: self.photos,
            created_by,
        })
    }
}
