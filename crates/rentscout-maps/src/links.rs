use rentscout_core::LatLng;

/// Google Maps search link centred on a position.
#[must_use]
pub fn maps_search_url(position: LatLng) -> String {
    format!(
        "https://www.google.com/maps/search/?q={},{}",
        position.lat, position.lng
    )
}

/// Google Maps transit directions link between two positions.
#[must_use]
pub fn directions_url(origin: LatLng, destination: LatLng) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=transit",
        origin.lat, origin.lng, destination.lat, destination.lng
    )
}
