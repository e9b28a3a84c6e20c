//! Places API (New) nearby search.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use rentscout_core::LatLng;

use crate::categories::{Category, MAX_RESULTS_PER_CATEGORY};
use crate::client::MapsClient;
use crate::distance::haversine_meters;
use crate::error::MapsError;

const FIELD_MASK: &str = "places.displayName,places.rating,places.userRatingCount,places.types,places.googleMapsUri,places.location";

/// Type tags that say nothing about the place beyond what its category
/// already implies.
const IGNORED_GENERIC_TYPES: &[&str] = &[
    "establishment",
    "point_of_interest",
    "locality",
    "restaurant",
    "food",
    "store",
];

static TYPE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)_(store|restaurant|station|stop|shop)").expect("valid regex")
});

/// One place, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub maps_link: String,
    /// `"<rating> (<count>)"` or `"no rating"`.
    pub rating: String,
    /// Straight-line distance from the search origin, rounded up.
    pub distance_m: u32,
    /// Informative type tags, shortened.
    pub types: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchNearbyRequest<'a> {
    included_types: &'a [&'a str],
    max_result_count: u32,
    location_restriction: LocationRestriction,
}

#[derive(Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Serialize)]
struct Circle {
    center: ApiLatLng,
    radius: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct SearchNearbyResponse {
    /// Omitted entirely when nothing matched.
    #[serde(default)]
    places: Vec<ApiPlace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlace {
    display_name: Option<LocalizedText>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_rating_count: Option<u32>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    google_maps_uri: String,
    location: ApiLatLng,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

impl MapsClient {
    /// Runs one nearby search for a category around `origin`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Http`] on network failure.
    /// - [`MapsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`MapsError::Deserialize`] on an unexpected body.
    pub async fn search_nearby(
        &self,
        origin: LatLng,
        category: &Category,
    ) -> Result<Vec<Place>, MapsError> {
        let request = SearchNearbyRequest {
            included_types: category.included_types,
            max_result_count: MAX_RESULTS_PER_CATEGORY,
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: ApiLatLng {
                        latitude: origin.lat,
                        longitude: origin.lng,
                    },
                    radius: category.radius_m,
                },
            },
        };

        let response = self
            .client
            .post(self.endpoints.places_nearby.clone())
            .header("X-Goog-Api-Key", &self.keys.places)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request)
            .send()
            .await?;

        let body: SearchNearbyResponse = Self::read_json("places", response).await?;

        Ok(body
            .places
            .into_iter()
            .map(|place| to_place(origin, place))
            .collect())
    }
}

fn to_place(origin: LatLng, place: ApiPlace) -> Place {
    let location = LatLng::new(place.location.latitude, place.location.longitude);
    // Ceil of a non-negative distance within earth's circumference fits in u32.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let distance_m = haversine_meters(origin, location).ceil() as u32;

    Place {
        name: place.display_name.map(|n| n.text).unwrap_or_default(),
        maps_link: place.google_maps_uri,
        rating: rating_label(place.rating, place.user_rating_count),
        distance_m,
        types: display_types(&place.types),
    }
}

fn rating_label(rating: Option<f64>, count: Option<u32>) -> String {
    match rating {
        Some(r) if r > 0.0 => format!("{r} ({})", count.unwrap_or(0)),
        _ => "no rating".to_owned(),
    }
}

/// Drops generic tags and strips common suffix noise (`bus_stop` → `bus`).
fn display_types(types: &[String]) -> Vec<String> {
    types
        .iter()
        .filter(|t| !IGNORED_GENERIC_TYPES.contains(&t.as_str()))
        .map(|t| TYPE_SUFFIX_RE.replace_all(t, "").into_owned())
        .collect()
}
