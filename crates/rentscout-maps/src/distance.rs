use rentscout_core::LatLng;

/// Equatorial earth radius in meters (WGS84).
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Great-circle distance between two positions using the haversine formula.
#[must_use]
pub fn haversine_meters(a: LatLng, b: LatLng) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
