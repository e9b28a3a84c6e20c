//! Google Maps Platform clients: geocoding, nearby places and transit routes.

pub mod categories;
pub mod client;
pub mod distance;
pub mod error;
pub mod geocode;
pub mod links;
pub mod places;
pub mod routes;

pub use categories::{Category, CategoryGroup, CategoryOutcome, CATEGORIES};
pub use client::{MapsClient, MapsEndpoints, MapsKeys};
pub use distance::haversine_meters;
pub use error::MapsError;
pub use links::maps_search_url;
pub use places::Place;
pub use routes::{next_monday_arrival, Route};
