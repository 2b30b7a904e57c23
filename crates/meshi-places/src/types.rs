//! Google Places API (New) response types.
//!
//! Field names follow the API's camelCase JSON. Only the fields requested by
//! the default field masks are modelled.

use serde::{Deserialize, Serialize};

/// A text value with its language tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Photo reference. `name` is the resource name used to fetch the media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePhoto {
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// A place as returned by text search or place details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Place id, e.g. `ChIJ...`.
    pub id: String,
    pub display_name: LocalizedText,
    pub formatted_address: String,
    #[serde(default)]
    pub types: Vec<String>,
    pub location: Location,
    pub google_maps_uri: String,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

/// Wrapper for the `places:searchText` response. The API omits `places`
/// entirely when nothing matched.
#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextSearchRequest<'a> {
    pub text_query: &'a str,
    pub max_result_count: u32,
    pub language_code: &'a str,
}

/// Error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
