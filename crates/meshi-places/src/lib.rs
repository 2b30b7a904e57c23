//! Client for the Google Places API (New) text search and place details
//! endpoints, used to look up a restaurant before it is posted.

pub mod client;
pub mod error;
pub mod types;

pub use client::{
    GooglePlacesClient, DEFAULT_BASE_URL, DEFAULT_LANGUAGE_CODE, DEFAULT_MAX_RESULTS,
    PLACE_DETAILS_FIELD_MASK, SEARCH_TEXT_FIELD_MASK,
};
pub use error::PlacesError;
pub use types::{LocalizedText, Location, Place, PlacePhoto};
