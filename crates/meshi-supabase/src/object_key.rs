//! Storage keys for uploaded place images: `{place_key}/{millis}-{random}.{ext}`.

use rand::Rng;

const RANDOM_SUFFIX_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A fresh object key for an image attached to `place_key`.
///
/// `place_key` is either a stored place id or a provisional id used before
/// the place is saved.
#[must_use]
pub fn place_image_key(place_key: &str, extension: &str) -> String {
    let mut rng = rand::rng();
    let random: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format_object_key(
        place_key,
        chrono::Utc::now().timestamp_millis(),
        &random,
        extension,
    )
}

#[must_use]
pub fn format_object_key(place_key: &str, millis: i64, random: &str, extension: &str) -> String {
    format!("{place_key}/{millis}-{random}.{extension}")
}
