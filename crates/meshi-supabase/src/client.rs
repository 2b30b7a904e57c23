//! HTTP client for the Supabase auth and storage REST endpoints.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use crate::error::SupabaseError;
use crate::types::{AuthUser, ErrorBody, RemoveObjectsRequest, UserResponse};

/// `cache-control` max-age applied to uploaded objects.
pub const CACHE_CONTROL_SECS: u32 = 3600;

/// Client for a single Supabase project.
///
/// Every request carries the project's anon key as `apikey`. Calls made on a
/// user's behalf also send the user's access token as a bearer token so
/// row-level and storage policies apply to that user.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    anon_key: String,
    base_url: Url,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .field("anon_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Creates a client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SupabaseError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, anon_key: &str, timeout_secs: u64) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("meshi-share/0.1")
            .build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| SupabaseError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SupabaseError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            anon_key: anon_key.to_owned(),
            base_url,
        })
    }

    /// Resolves the user that owns `access_token`.
    ///
    /// # Errors
    ///
    /// - [`SupabaseError::Unauthorized`] if the token is rejected.
    /// - [`SupabaseError::Api`] on any other non-2xx status.
    /// - [`SupabaseError::Http`] on network failure.
    /// - [`SupabaseError::Deserialize`] if the user payload is malformed.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let url = self.endpoint(&["auth", "v1", "user"]);
        let response = self
            .send(self.client.get(url), Some(access_token))
            .await?;
        let body = response.text().await?;

        let user: UserResponse =
            serde_json::from_str(&body).map_err(|e| SupabaseError::Deserialize {
                context: "auth/v1/user".to_owned(),
                source: e,
            })?;
        Ok(user.into())
    }

    /// Uploads `bytes` to `bucket` at `path` without overwriting.
    ///
    /// Returns the stored object path (the same `path` that was passed).
    ///
    /// # Errors
    ///
    /// - [`SupabaseError::Unauthorized`] if the token is rejected.
    /// - [`SupabaseError::Api`] on any other non-2xx status, including an
    ///   existing object at `path`.
    /// - [`SupabaseError::Http`] on network failure.
    pub async fn upload_object(
        &self,
        access_token: &str,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, SupabaseError> {
        let url = self.object_url(&["storage", "v1", "object", bucket], path);
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(
                reqwest::header::CACHE_CONTROL,
                format!("max-age={CACHE_CONTROL_SECS}"),
            )
            .header("x-upsert", "false")
            .body(bytes);

        self.send(request, Some(access_token)).await?;
        tracing::debug!(bucket, path, "object uploaded");
        Ok(path.to_owned())
    }

    /// Removes the objects at `paths` from `bucket`.
    ///
    /// # Errors
    ///
    /// - [`SupabaseError::Unauthorized`] if the token is rejected.
    /// - [`SupabaseError::Api`] on any other non-2xx status.
    /// - [`SupabaseError::Http`] on network failure.
    pub async fn delete_objects(
        &self,
        access_token: &str,
        bucket: &str,
        paths: &[String],
    ) -> Result<(), SupabaseError> {
        let url = self.endpoint(&["storage", "v1", "object", bucket]);
        let request = self
            .client
            .delete(url)
            .json(&RemoveObjectsRequest { prefixes: paths });

        self.send(request, Some(access_token)).await?;
        tracing::debug!(bucket, count = paths.len(), "objects removed");
        Ok(())
    }

    /// Public URL for an object in a public bucket. No request is made.
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_url(&["storage", "v1", "object", "public", bucket], path)
            .to_string()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
        }
        url
    }

    /// `endpoint(prefix)` followed by each `/`-separated piece of `path`.
    fn object_url(&self, prefix: &[&str], path: &str) -> Url {
        let mut url = self.endpoint(prefix);
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    async fn send(
        &self,
        request: RequestBuilder,
        access_token: Option<&str>,
    ) -> Result<Response, SupabaseError> {
        let mut request = request.header("apikey", &self.anon_key);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(SupabaseError::Unauthorized(message));
        }
        tracing::warn!(status = status.as_u16(), %message, "supabase request failed");
        Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
