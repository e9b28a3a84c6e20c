//! Shared HTTP client for the three Google Maps Platform APIs.

use std::time::Duration;

use reqwest::{Client, Response, Url};

use crate::error::MapsError;

/// One API key per Google product; they are often restricted separately.
#[derive(Clone)]
pub struct MapsKeys {
    pub geocoding: String,
    pub places: String,
    pub routes: String,
}

/// Fully-qualified endpoint URLs.
#[derive(Debug, Clone)]
pub struct MapsEndpoints {
    pub geocode: Url,
    pub places_nearby: Url,
    pub compute_routes: Url,
}

impl MapsEndpoints {
    /// Production endpoints.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the constants are valid URLs.
    pub fn google() -> Result<Self, MapsError> {
        Ok(Self {
            geocode: parse_endpoint("https://maps.googleapis.com/maps/api/geocode/json")?,
            places_nearby: parse_endpoint("https://places.googleapis.com/v1/places:searchNearby")?,
            compute_routes: parse_endpoint(
                "https://routes.googleapis.com/directions/v2:computeRoutes",
            )?,
        })
    }

    /// Same paths as production, rooted at `base_url` (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::InvalidEndpoint`] if `base_url` does not parse.
    pub fn under(base_url: &str) -> Result<Self, MapsError> {
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            geocode: parse_endpoint(&format!("{base}/maps/api/geocode/json"))?,
            places_nearby: parse_endpoint(&format!("{base}/v1/places:searchNearby"))?,
            compute_routes: parse_endpoint(&format!("{base}/directions/v2:computeRoutes"))?,
        })
    }
}

fn parse_endpoint(url: &str) -> Result<Url, MapsError> {
    Url::parse(url).map_err(|e| MapsError::InvalidEndpoint {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

/// Client for geocoding, nearby search and route computation.
///
/// Every call is attempted once; there is no retry layer.
pub struct MapsClient {
    pub(crate) client: Client,
    pub(crate) keys: MapsKeys,
    pub(crate) endpoints: MapsEndpoints,
}

impl MapsClient {
    /// Creates a client against the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(keys: MapsKeys, timeout_secs: u64, user_agent: &str) -> Result<Self, MapsError> {
        Self::with_endpoints(keys, timeout_secs, user_agent, MapsEndpoints::google()?)
    }

    /// Creates a client against custom endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_endpoints(
        keys: MapsKeys,
        timeout_secs: u64,
        user_agent: &str,
        endpoints: MapsEndpoints,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            keys,
            endpoints,
        })
    }

    /// Asserts a 2xx status and deserializes the body.
    pub(crate) async fn read_json<T>(
        service: &'static str,
        response: Response,
    ) -> Result<T, MapsError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MapsError::UnexpectedStatus {
                service,
                status: status.as_u16(),
                message: google_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
            context: service.to_owned(),
            source: e,
        })
    }
}

/// Pulls `error.message` out of a Google error envelope, falling back to a
/// truncated raw body.
fn google_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_owned))
        .unwrap_or_else(|| body.chars().take(512).collect())
}
