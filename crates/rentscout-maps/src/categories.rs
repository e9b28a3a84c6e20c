//! Points-of-interest categories and the concurrent per-category search.

use futures::future::join_all;
use serde::Serialize;

use rentscout_core::LatLng;

use crate::client::MapsClient;
use crate::places::Place;

pub const DEFAULT_RADIUS_M: f64 = 500.0;
pub const MAX_RESULTS_PER_CATEGORY: u32 = 5;

/// One nearby-search query: a set of place types within a radius.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub included_types: &'static [&'static str],
    pub radius_m: f64,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "food",
        included_types: &["vegetarian_restaurant", "vegan_restaurant", "restaurant"],
        radius_m: DEFAULT_RADIUS_M,
    },
    Category {
        name: "drink",
        included_types: &["pub", "bar", "cafe"],
        radius_m: DEFAULT_RADIUS_M,
    },
    Category {
        name: "bakery",
        included_types: &["bakery"],
        radius_m: DEFAULT_RADIUS_M,
    },
    Category {
        name: "shop",
        included_types: &["supermarket", "grocery_store"],
        radius_m: DEFAULT_RADIUS_M,
    },
    Category {
        name: "commute",
        included_types: &["subway_station", "bus_stop"],
        radius_m: 1_000.0,
    },
    Category {
        name: "skatepark",
        included_types: &["skateboard_park"],
        radius_m: 2_000.0,
    },
];

/// Outcome of one category search. Serializes as either `{"places": [...]}`
/// or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryOutcome {
    Places { places: Vec<Place> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: &'static str,
    #[serde(flatten)]
    pub outcome: CategoryOutcome,
}

impl CategoryGroup {
    fn failed(category: &'static str) -> Self {
        Self {
            category,
            outcome: CategoryOutcome::Failed {
                error: format!("Could not retrieve {category} point of interests"),
            },
        }
    }
}

impl MapsClient {
    /// Searches every category in [`CATEGORIES`] around `origin`.
    pub async fn find_points_of_interest(&self, origin: LatLng) -> Vec<CategoryGroup> {
        self.find_points_of_interest_in(origin, CATEGORIES).await
    }

    /// Searches each category concurrently and waits for all of them.
    ///
    /// Returns exactly one group per category, in input order. A failed
    /// search becomes that category's error marker and does not affect the
    /// others.
    pub async fn find_points_of_interest_in(
        &self,
        origin: LatLng,
        categories: &[Category],
    ) -> Vec<CategoryGroup> {
        let searches = categories.iter().map(|category| async move {
            match self.search_nearby(origin, category).await {
                Ok(places) => CategoryGroup {
                    category: category.name,
                    outcome: CategoryOutcome::Places { places },
                },
                Err(e) => {
                    tracing::warn!(category = category.name, error = %e, "nearby search failed");
                    CategoryGroup::failed(category.name)
                }
            }
        });

        join_all(searches).await
    }
}
