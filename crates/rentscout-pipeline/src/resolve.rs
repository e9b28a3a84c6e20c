//! Turning a listing into coordinates precise enough for a walking-radius
//! search.

use rentscout_core::{Ad, LatLng};
use rentscout_extract::{AddressCandidate, ExtractClient};
use rentscout_jinka::JinkaClient;
use rentscout_maps::{MapsClient, MapsError};

use crate::error::UpstreamError;

/// Borrowing view over the clients the fallback chain needs.
pub struct AddressResolver<'a> {
    jinka: &'a JinkaClient,
    extract: &'a ExtractClient,
    maps: &'a MapsClient,
}

impl<'a> AddressResolver<'a> {
    #[must_use]
    pub fn new(jinka: &'a JinkaClient, extract: &'a ExtractClient, maps: &'a MapsClient) -> Self {
        Self {
            jinka,
            extract,
            maps,
        }
    }

    /// Resolves an ad to coordinates, stopping at the first precise result.
    ///
    /// 1. Coordinates already on the ad.
    /// 2. LLM extraction over the ad record, then geocode its address.
    /// 3. Otherwise geocode its first point of interest.
    /// 4. Otherwise geocode `"<neighbourhood>, <city>"`.
    /// 5. Otherwise fetch the listing source HTML, extract again and geocode
    ///    the address or first point of interest from that pass.
    ///
    /// Geocoder results that are only postal-code precise count as misses.
    /// Returns `Ok(None)` when every branch misses.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if steps 2 to 4 hit a service failure. Any
    /// failure inside step 5 is logged and treated as a miss.
    pub async fn resolve_ad(&self, ad: &Ad) -> Result<Option<LatLng>, UpstreamError> {
        if let Some(position) = ad.known_position() {
            tracing::debug!(ad_id = %ad.id, "ad carries coordinates");
            return Ok(Some(position));
        }

        let candidate = self.extract.extract_from_ad(ad).await?;
        if let Some(position) = self.geocode_candidate(&candidate).await? {
            return Ok(Some(position));
        }

        if let Some(query) = ad.neighbourhood_query() {
            if let Some(position) = self.maps.geocode(&query).await? {
                tracing::debug!(ad_id = %ad.id, query = %query, "resolved from neighbourhood");
                return Ok(Some(position));
            }
        }

        match self.resolve_from_source(ad).await {
            Ok(position) => {
                if position.is_none() {
                    tracing::info!(ad_id = %ad.id, "no precise address found for ad");
                }
                Ok(position)
            }
            Err(e) => {
                tracing::warn!(ad_id = %ad.id, error = %e, "listing source fallback failed");
                Ok(None)
            }
        }
    }

    /// Geocodes a free-text address with the same precision floor.
    ///
    /// Blank input resolves to `None` without calling the geocoder.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Maps`] if the geocoder fails.
    pub async fn resolve_address(&self, text: &str) -> Result<Option<LatLng>, UpstreamError> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(None);
        }
        Ok(self.maps.geocode(query).await?)
    }

    async fn resolve_from_source(&self, ad: &Ad) -> Result<Option<LatLng>, UpstreamError> {
        let html = self.jinka.get_ad_source(&ad.id).await?;
        let candidate = self.extract.extract_from_source(&html).await?;
        Ok(self.geocode_candidate(&candidate).await?)
    }

    /// Tries the candidate's address, then its first point of interest.
    async fn geocode_candidate(
        &self,
        candidate: &AddressCandidate,
    ) -> Result<Option<LatLng>, MapsError> {
        let queries = [candidate.address(), candidate.first_point_of_interest()];
        for query in queries.into_iter().flatten() {
            if let Some(position) = self.maps.geocode(query).await? {
                tracing::debug!(query, "resolved from extracted text");
                return Ok(Some(position));
            }
        }
        Ok(None)
    }
}
