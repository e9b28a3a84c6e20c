//! Listing-to-neighbourhood pipeline.
//!
//! Resolves a Jinka listing (or a free-text address) to coordinates through
//! an ordered fallback chain, then surveys the surroundings: nearby places per
//! category and the transit commute to a fixed work location.

pub mod error;
pub mod resolve;
pub mod scout;
pub mod survey;

pub use error::{LookupError, SetupError, UpstreamError};
pub use resolve::AddressResolver;
pub use scout::Scout;
pub use survey::{survey_around, Survey};
