//! End-to-end lookups: listing URL or free text in, [`Survey`] out.

use chrono::{FixedOffset, Utc};

use rentscout_core::{AppConfig, LatLng};
use rentscout_extract::ExtractClient;
use rentscout_jinka::{extract_ad_id_from_url, JinkaClient};
use rentscout_maps::{next_monday_arrival, MapsClient, MapsKeys};

use crate::error::{LookupError, SetupError};
use crate::resolve::AddressResolver;
use crate::survey::{survey_around, Survey};

/// Owns the service clients and the fixed commute parameters.
///
/// Holds no mutable state, so one instance is shared by every request.
pub struct Scout {
    jinka: JinkaClient,
    extract: ExtractClient,
    maps: MapsClient,
    work_location: LatLng,
    arrival_offset: FixedOffset,
}

impl Scout {
    #[must_use]
    pub fn new(
        jinka: JinkaClient,
        extract: ExtractClient,
        maps: MapsClient,
        work_location: LatLng,
        arrival_offset: FixedOffset,
    ) -> Self {
        Self {
            jinka,
            extract,
            maps,
            work_location,
            arrival_offset,
        }
    }

    /// Builds production clients from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if any HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let timeout = config.request_timeout_secs;
        let user_agent = config.user_agent.as_str();

        let jinka = JinkaClient::new(&config.jinka_token, timeout, user_agent)?;
        let extract = ExtractClient::new(
            &config.openai_api_key,
            &config.openai_model,
            timeout,
            user_agent,
        )?;
        let keys = MapsKeys {
            geocoding: config.geocoding_key.clone(),
            places: config.nearby_search_key.clone(),
            routes: config.routes_key.clone(),
        };
        let maps = MapsClient::new(keys, timeout, user_agent)?;

        Ok(Self::new(
            jinka,
            extract,
            maps,
            config.work_location,
            config.arrival_utc_offset,
        ))
    }

    #[must_use]
    pub fn resolver(&self) -> AddressResolver<'_> {
        AddressResolver::new(&self.jinka, &self.extract, &self.maps)
    }

    /// Surveys the place advertised by a pasted Jinka listing URL.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidAdUrl`] if the URL has no `ad` parameter. No
    ///   request is made in that case.
    /// - [`LookupError::AdNotFound`] if the ad record cannot be fetched.
    /// - [`LookupError::AddressNotFound`] if no precise position is found.
    /// - [`LookupError::Upstream`] on any other service failure.
    pub async fn lookup_ad_url(&self, listing_url: &str) -> Result<Survey, LookupError> {
        let ad_id = extract_ad_id_from_url(listing_url).ok_or(LookupError::InvalidAdUrl)?;
        let ad = self
            .jinka
            .find_ad(&ad_id)
            .await
            .ok_or(LookupError::AdNotFound)?;

        let position = self
            .resolver()
            .resolve_ad(&ad)
            .await?
            .ok_or(LookupError::AddressNotFound)?;

        tracing::info!(ad_id = %ad_id, %position, "ad resolved");
        self.survey(position).await
    }

    /// Surveys a free-text address.
    ///
    /// # Errors
    ///
    /// - [`LookupError::AddressNotFound`] if the text does not geocode to a
    ///   precise position.
    /// - [`LookupError::Upstream`] on any service failure.
    pub async fn lookup_address(&self, text: &str) -> Result<Survey, LookupError> {
        let position = self
            .resolver()
            .resolve_address(text)
            .await?
            .ok_or(LookupError::AddressNotFound)?;

        tracing::info!(%position, "address resolved");
        self.survey(position).await
    }

    /// Route and points of interest around an already resolved position.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Upstream`] if the route cannot be computed.
    pub async fn survey(&self, position: LatLng) -> Result<Survey, LookupError> {
        let now = Utc::now().with_timezone(&self.arrival_offset);
        let arrival = next_monday_arrival(now);
        Ok(survey_around(&self.maps, position, self.work_location, arrival).await?)
    }
}
