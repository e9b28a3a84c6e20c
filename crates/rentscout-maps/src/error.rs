use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}: {message}")]
    UnexpectedStatus {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Non-OK `status` field in a 200 geocoding response.
    #[error("geocoding API error {status}: {message}")]
    GeocodeStatus { status: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no transit route found")]
    NoRoute,

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
