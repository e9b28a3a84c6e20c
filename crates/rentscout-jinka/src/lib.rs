//! Client for the Jinka rental classifieds API.

pub mod client;
pub mod error;
pub mod url;

pub use client::JinkaClient;
pub use error::JinkaError;
pub use url::extract_ad_id_from_url;
