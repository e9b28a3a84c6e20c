//! HTTP client for the Jinka API.
//!
//! Two endpoints are used: the alert API, which serves one ad as a JSON
//! record, and the ad view page, which serves the original listing HTML as
//! scraped by Jinka from the publishing site.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use rentscout_core::Ad;

use crate::error::JinkaError;

const DEFAULT_BASE_URL: &str = "https://api.jinka.fr/";

#[derive(Debug, Deserialize)]
struct AdEnvelope {
    ad: Option<Ad>,
}

/// Client for the Jinka API.
///
/// Use [`JinkaClient::new`] for production or [`JinkaClient::with_base_url`]
/// to point at a mock server in tests.
pub struct JinkaClient {
    client: Client,
    alert_token: String,
    base_url: Url,
}

impl JinkaClient {
    /// Creates a new client pointed at the production Jinka API.
    ///
    /// # Errors
    ///
    /// Returns [`JinkaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(alert_token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, JinkaError> {
        Self::with_base_url(alert_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`JinkaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`JinkaError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        alert_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, JinkaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Trailing slash so path segments append instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| JinkaError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            alert_token: alert_token.to_owned(),
            base_url,
        })
    }

    /// Fetches one ad record by id.
    ///
    /// # Errors
    ///
    /// - [`JinkaError::NotFound`] on HTTP 404 or a `null` ad in the envelope.
    /// - [`JinkaError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`JinkaError::Http`] on network failure.
    /// - [`JinkaError::Deserialize`] if the body does not match the expected shape.
    pub async fn get_ad(&self, ad_id: &str) -> Result<Ad, JinkaError> {
        let url = self.ad_url(ad_id);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(JinkaError::NotFound {
                ad_id: ad_id.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(JinkaError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.redacted(&url),
            });
        }

        let body = response.text().await?;
        let envelope: AdEnvelope =
            serde_json::from_str(&body).map_err(|e| JinkaError::Deserialize {
                context: format!("ad(id={ad_id})"),
                source: e,
            })?;

        envelope.ad.ok_or_else(|| JinkaError::NotFound {
            ad_id: ad_id.to_owned(),
        })
    }

    /// Fetches an ad, collapsing every failure into `None`.
    ///
    /// Callers only need to tell the user the ad could not be found; the
    /// underlying cause is logged.
    pub async fn find_ad(&self, ad_id: &str) -> Option<Ad> {
        match self.get_ad(ad_id).await {
            Ok(ad) => Some(ad),
            Err(e) => {
                tracing::warn!(ad_id, error = %e, "jinka ad fetch failed");
                None
            }
        }
    }

    /// Fetches the original listing HTML for an ad.
    ///
    /// This endpoint intermittently answers 403 for the same ad that succeeds
    /// moments later.
    ///
    /// # Errors
    ///
    /// - [`JinkaError::UnexpectedStatus`] on any non-2xx status.
    /// - [`JinkaError::Http`] on network failure.
    pub async fn get_ad_source(&self, ad_id: &str) -> Result<String, JinkaError> {
        let url = self.source_url(ad_id);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(JinkaError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.redacted(&url),
            });
        }

        Ok(response.text().await?)
    }

    /// `{base}/apiv2/alert/{token}/ad/{id}`
    fn ad_url(&self, ad_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["apiv2", "alert", self.alert_token.as_str(), "ad", ad_id]);
        }
        url
    }

    /// `{base}/alert_result_view_ad?alert_token={token}&ad={id}`
    fn source_url(&self, ad_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("alert_result_view_ad");
        }
        url.query_pairs_mut()
            .append_pair("alert_token", &self.alert_token)
            .append_pair("ad", ad_id);
        url
    }

    /// URL string with the alert token masked, for errors and logs.
    fn redacted(&self, url: &Url) -> String {
        url.as_str().replace(&self.alert_token, "[redacted]")
    }
}
