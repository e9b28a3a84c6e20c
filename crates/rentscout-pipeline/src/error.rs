use rentscout_extract::ExtractError;
use rentscout_jinka::JinkaError;
use rentscout_maps::MapsError;
use thiserror::Error;

/// A failure of one of the external services that is not a plain "not found".
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("jinka: {0}")]
    Jinka(#[from] JinkaError),

    #[error("address extraction: {0}")]
    Extract(#[from] ExtractError),

    #[error("maps: {0}")]
    Maps(#[from] MapsError),
}

/// Outcome classes of a lookup, as reported to the user.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Could not extract ad ID from URL")]
    InvalidAdUrl,

    #[error("Could not find this Jinka ad")]
    AdNotFound,

    #[error("Could not get the address")]
    AddressNotFound,

    #[error("upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
}

impl LookupError {
    /// `true` for the recoverable classes the user can act on by trying
    /// another listing or address.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Upstream(_))
    }

    /// Message safe to show to the user. Upstream details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Upstream(_) => "Something went wrong while surveying this place".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<MapsError> for LookupError {
    fn from(e: MapsError) -> Self {
        Self::Upstream(e.into())
    }
}

/// Failure to build the service clients at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("jinka client: {0}")]
    Jinka(#[from] JinkaError),

    #[error("extraction client: {0}")]
    Extract(#[from] ExtractError),

    #[error("maps client: {0}")]
    Maps(#[from] MapsError),
}
