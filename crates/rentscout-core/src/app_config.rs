use std::net::SocketAddr;

use chrono::FixedOffset;

use crate::geo::LatLng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub jinka_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub geocoding_key: String,
    pub nearby_search_key: String,
    pub routes_key: String,
    /// Fixed commute destination.
    pub work_location: LatLng,
    /// Offset used to express the Monday 09:00 arrival time.
    pub arrival_utc_offset: FixedOffset,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("jinka_token", &"[redacted]")
            .field("openai_api_key", &"[redacted]")
            .field("openai_model", &self.openai_model)
            .field("geocoding_key", &"[redacted]")
            .field("nearby_search_key", &"[redacted]")
            .field("routes_key", &"[redacted]")
            .field("work_location", &self.work_location)
            .field("arrival_utc_offset", &self.arrival_utc_offset)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
