//! Routes API transit route computation.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use rentscout_core::LatLng;

use crate::client::MapsClient;
use crate::error::MapsError;
use crate::links::directions_url;

const FIELD_MASK: &str = "routes.legs.steps.travelMode,\
routes.legs.steps.transitDetails.transitLine.nameShort,\
routes.legs.steps.transitDetails.transitLine.vehicle.type,\
routes.localizedValues.duration";

/// Hour of the Monday arrival the commute is computed for.
const ARRIVAL_HOUR: i64 = 9;

/// Transit route summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Distinct travel modes in order of first use, e.g. `["walking", "subway 14"]`.
    pub modes: Vec<String>,
    /// Localized total duration, e.g. `"35 min"`.
    pub duration: String,
    pub directions_link: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    arrival_time: String,
    language_code: &'static str,
}

#[derive(Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: ApiLatLng,
}

#[derive(Serialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

impl From<LatLng> for Waypoint {
    fn from(p: LatLng) -> Self {
        Self {
            location: Location {
                lat_lng: ApiLatLng {
                    latitude: p.lat,
                    longitude: p.lng,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    #[serde(default)]
    localized_values: Option<LocalizedValues>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    #[serde(default)]
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiStep {
    #[serde(default)]
    travel_mode: Option<String>,
    #[serde(default)]
    transit_details: Option<TransitDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransitDetails {
    #[serde(default)]
    transit_line: Option<TransitLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransitLine {
    #[serde(default)]
    name_short: Option<String>,
    #[serde(default)]
    vehicle: Option<Vehicle>,
}

#[derive(Debug, Deserialize)]
struct Vehicle {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocalizedValues {
    #[serde(default)]
    duration: Option<LocalizedText>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

impl MapsClient {
    /// Computes a transit route from `origin` to `destination` arriving at
    /// `arrival`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Http`] on network failure.
    /// - [`MapsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`MapsError::Deserialize`] on an unexpected body.
    /// - [`MapsError::NoRoute`] if the API returned no route.
    pub async fn transit_route(
        &self,
        origin: LatLng,
        destination: LatLng,
        arrival: DateTime<FixedOffset>,
    ) -> Result<Route, MapsError> {
        let request = ComputeRoutesRequest {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: "TRANSIT",
            arrival_time: arrival.to_rfc3339(),
            language_code: "fr-FR",
        };

        let response = self
            .client
            .post(self.endpoints.compute_routes.clone())
            .header("X-Goog-Api-Key", &self.keys.routes)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request)
            .send()
            .await?;

        let body: ComputeRoutesResponse = Self::read_json("routes", response).await?;
        let route = body.routes.into_iter().next().ok_or(MapsError::NoRoute)?;

        Ok(Route {
            modes: travel_modes(&route),
            duration: route
                .localized_values
                .and_then(|v| v.duration)
                .map(|d| d.text)
                .unwrap_or_default(),
            directions_link: directions_url(origin, destination),
        })
    }
}

/// Distinct step modes across all legs, in order of first appearance.
fn travel_modes(route: &ApiRoute) -> Vec<String> {
    let mut modes: Vec<String> = Vec::new();
    for step in route.legs.iter().flat_map(|leg| &leg.steps) {
        if let Some(label) = mode_label(step) {
            if !modes.contains(&label) {
                modes.push(label);
            }
        }
    }
    modes
}

fn mode_label(step: &ApiStep) -> Option<String> {
    match step.travel_mode.as_deref()? {
        "WALK" => Some("walking".to_owned()),
        "TRANSIT" => {
            let line = step
                .transit_details
                .as_ref()
                .and_then(|d| d.transit_line.as_ref());
            let vehicle = line
                .and_then(|l| l.vehicle.as_ref())
                .and_then(|v| v.kind.as_deref())
                .unwrap_or("transit")
                .to_lowercase();
            match line.and_then(|l| l.name_short.as_deref()) {
                Some(name) if !name.trim().is_empty() => Some(format!("{vehicle} {}", name.trim())),
                _ => Some(vehicle),
            }
        }
        other => Some(other.to_lowercase()),
    }
}

/// The next Monday 09:00 in `now`'s offset that is strictly after `now`.
///
/// On a Monday before 09:00 that is the same day.
#[must_use]
pub fn next_monday_arrival(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let offset = *now.offset();
    let local = now.naive_local();
    let nine = NaiveTime::MIN + TimeDelta::hours(ARRIVAL_HOUR);

    let days_until_monday = (7 - local.weekday().num_days_from_monday()) % 7;
    let mut arrival = (local.date() + Days::new(u64::from(days_until_monday))).and_time(nine);
    if arrival <= local {
        arrival = arrival + Days::new(7);
    }

    let utc = arrival - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}
