//! Rental listing record as returned by the Jinka classifieds API.
//!
//! Only the fields the address resolver branches on are modelled. Every other
//! field of the upstream payload is kept verbatim in [`Ad::extra`] so the full
//! record can be handed to the LLM extraction step unchanged.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::LatLng;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    /// Jinka ad identifier. The API serves it as a number; listing URLs carry
    /// it as a string, so both are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default)]
    pub lng: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,

    /// Neighbourhood name (`quartier_name` upstream).
    #[serde(default)]
    pub quartier_name: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Ad {
    /// Coordinates already attached to the listing, if usable.
    ///
    /// A zero on either axis is treated as unset; Jinka emits `0` for listings
    /// it could not place.
    #[must_use]
    pub fn known_position(&self) -> Option<LatLng> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    /// `"<neighbourhood>, <city>"` when both parts are non-empty.
    #[must_use]
    pub fn neighbourhood_query(&self) -> Option<String> {
        let quartier = self.quartier_name.as_deref().map(str::trim)?;
        let city = self.city.trim();
        if quartier.is_empty() || city.is_empty() {
            return None;
        }
        Some(format!("{quartier}, {city}"))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for ad id, got {other}"
        ))),
    }
}
