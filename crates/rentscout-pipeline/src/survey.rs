use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use rentscout_core::LatLng;
use rentscout_maps::{maps_search_url, CategoryGroup, MapsClient, MapsError, Route};

/// Everything shown for one resolved position.
#[derive(Debug, Clone, Serialize)]
pub struct Survey {
    pub position: LatLng,
    pub maps_url: String,
    /// One group per category, in category order.
    pub points_of_interest: Vec<CategoryGroup>,
    /// Transit commute to the work location.
    pub route: Route,
}

/// Runs the commute route and the category searches around `position`
/// concurrently.
///
/// # Errors
///
/// Returns [`MapsError`] if the route computation fails. Category failures
/// are reported inside [`Survey::points_of_interest`] instead.
pub async fn survey_around(
    maps: &MapsClient,
    position: LatLng,
    work_location: LatLng,
    arrival: DateTime<FixedOffset>,
) -> Result<Survey, MapsError> {
    let (route, points_of_interest) = tokio::join!(
        maps.transit_route(position, work_location, arrival),
        maps.find_points_of_interest(position),
    );

    Ok(Survey {
        position,
        maps_url: maps_search_url(position),
        points_of_interest,
        route: route?,
    })
}
