//! LLM-backed address extraction from rental listings.
//!
//! Sends either the structured ad record or the scraped listing HTML to the
//! `OpenAI` Responses API with a strict JSON schema, and returns the address
//! and point-of-interest names it found.

pub mod client;
pub mod error;
pub mod types;

mod prompt;

pub use client::ExtractClient;
pub use error::ExtractError;
pub use types::AddressCandidate;
