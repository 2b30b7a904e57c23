//! HTTP client for the Google Places API (New).
//!
//! Wraps `reqwest` with API key and field-mask headers and typed response
//! deserialization. Non-2xx responses surface as [`PlacesError::Api`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::types::{ErrorEnvelope, Place, TextSearchRequest, TextSearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_MAX_RESULTS: u32 = 5;
pub const DEFAULT_LANGUAGE_CODE: &str = "ja";

/// Field mask for text search. Search responses nest fields under `places.`.
pub const SEARCH_TEXT_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.types,places.location,places.googleMapsUri,places.photos";

/// Field mask for place details.
pub const PLACE_DETAILS_FIELD_MASK: &str =
    "id,displayName,formattedAddress,types,location,googleMapsUri,photos";

/// Client for the Google Places API.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("meshi-share/0.1")
            .build()?;

        let normalised = base_url.trim_end_matches('/');
        let base_url = Url::parse(normalised)
            .map_err(|e| PlacesError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PlacesError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches places by free text (shop name plus area, for example).
    ///
    /// Results are requested in Japanese. An empty match list is returned as
    /// an empty `Vec`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns a non-2xx status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_text(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.endpoint(&["places:searchText"]);
        let body = TextSearchRequest {
            text_query: query,
            max_result_count: max_results,
            language_code: DEFAULT_LANGUAGE_CODE,
        };
        let request = self
            .client
            .post(url)
            .header("X-Goog-FieldMask", SEARCH_TEXT_FIELD_MASK)
            .json(&body);

        let response: TextSearchResponse = self
            .send(request, &format!("searchText(query={query})"))
            .await?;

        tracing::debug!(query, count = response.places.len(), "places text search");
        Ok(response.places)
    }

    /// Fetches a single place by its place id.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns a non-2xx status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_place_details(&self, place_id: &str) -> Result<Place, PlacesError> {
        let url = self.endpoint(&["places", place_id]);
        let request = self
            .client
            .get(url)
            .header("X-Goog-FieldMask", PLACE_DETAILS_FIELD_MASK);

        self.send(request, &format!("getPlaceDetails(id={place_id})"))
            .await
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attaches the API key, sends the request, and decodes a 2xx JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = request.header("X-Goog-Api-Key", &self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_owned()
                });
            tracing::warn!(status = status.as_u16(), %message, context, "places api error");
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
