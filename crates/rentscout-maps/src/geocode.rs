//! Forward geocoding with a precision floor.

use serde::Deserialize;

use rentscout_core::LatLng;

use crate::client::MapsClient;
use crate::error::MapsError;

/// Top result type rejected as too coarse for a walking-radius search.
const POSTAL_CODE_TYPE: &str = "postal_code";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

impl MapsClient {
    /// Geocodes a free-text address and returns the first result's location.
    ///
    /// Returns `Ok(None)` when there are no results or when the first result
    /// is only postal-code precise.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Http`] on network failure.
    /// - [`MapsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`MapsError::GeocodeStatus`] when the API reports anything other
    ///   than `OK` or `ZERO_RESULTS`.
    /// - [`MapsError::Deserialize`] on an unexpected body.
    pub async fn geocode(&self, address: &str) -> Result<Option<LatLng>, MapsError> {
        let response = self
            .client
            .get(self.endpoints.geocode.clone())
            .query(&[("address", address), ("key", self.keys.geocoding.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = Self::read_json("geocoding", response).await?;
        precise_location(address, body)
    }
}

fn precise_location(query: &str, body: GeocodeResponse) -> Result<Option<LatLng>, MapsError> {
    match body.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        _ => {
            return Err(MapsError::GeocodeStatus {
                status: body.status,
                message: body.error_message.unwrap_or_default(),
            })
        }
    }

    let Some(first) = body.results.into_iter().next() else {
        tracing::debug!(query, "geocoding returned no results");
        return Ok(None);
    };

    if first.types.first().map(String::as_str) == Some(POSTAL_CODE_TYPE) {
        tracing::debug!(query, "geocoding result only postal-code precise, rejected");
        return Ok(None);
    }

    Ok(Some(first.geometry.location))
}
