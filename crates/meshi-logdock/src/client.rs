//! HTTP client for the LogDock collector.

use std::time::Duration;

use meshi_core::app_config::APP_NAME;
use meshi_core::LogdockSettings;
use reqwest::{Client, RequestBuilder, Url};

use crate::entry::{LogEntry, LogPayload};
use crate::error::LogdockError;

const CF_ACCESS_CLIENT_ID: &str = "CF-Access-Client-Id";
const CF_ACCESS_CLIENT_SECRET: &str = "CF-Access-Client-Secret";

/// Client for a LogDock collector, optionally behind Cloudflare Access.
pub struct LogdockClient {
    client: Client,
    base_url: Url,
    api_key: String,
    cf_access: Option<(String, String)>,
}

impl LogdockClient {
    /// Builds a client from the collector settings.
    ///
    /// Cloudflare Access headers are sent only when both the client id and
    /// secret are configured.
    ///
    /// # Errors
    ///
    /// Returns [`LogdockError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LogdockError::InvalidBaseUrl`] if the
    /// collector URL is not a valid URL.
    pub fn new(settings: &LogdockSettings, timeout_secs: u64) -> Result<Self, LogdockError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("meshi-share/0.1")
            .build()?;

        let raw = settings.api_url.trim_end_matches('/');
        let base_url =
            Url::parse(raw).map_err(|e| LogdockError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LogdockError::InvalidBaseUrl(raw.to_owned()));
        }

        let cf_access = settings
            .cf_access_client_id
            .clone()
            .zip(settings.cf_access_client_secret.clone());

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key.clone(),
            cf_access,
        })
    }

    /// Posts one entry to `/logs`.
    ///
    /// # Errors
    ///
    /// Returns [`LogdockError::Rejected`] on a non-2xx status, or
    /// [`LogdockError::Http`] on network failure.
    pub async fn send(&self, entry: &LogEntry) -> Result<(), LogdockError> {
        let request = self
            .client
            .post(self.endpoint("logs"))
            .json(&LogPayload::new(APP_NAME, entry));

        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(LogdockError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    /// Returns `true` when `/health` answers with a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`LogdockError::Http`] on network failure.
    pub async fn health(&self) -> Result<bool, LogdockError> {
        let request = self.client.get(self.endpoint("health"));
        let response = self.authorize(request).send().await?;
        Ok(response.status().is_success())
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().push(name);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-API-Key", &self.api_key);
        match &self.cf_access {
            Some((id, secret)) => request
                .header(CF_ACCESS_CLIENT_ID, id)
                .header(CF_ACCESS_CLIENT_SECRET, secret),
            None => request,
        }
    }
}

impl std::fmt::Debug for LogdockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogdockClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("cf_access", &self.cf_access.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}
