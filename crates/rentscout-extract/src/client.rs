//! HTTP client for the `OpenAI` Responses API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use rentscout_core::Ad;

use crate::error::ExtractError;
use crate::prompt::{address_schema, AD_RECORD_INSTRUCTIONS, AD_SOURCE_INSTRUCTIONS, SCHEMA_NAME};
use crate::types::AddressCandidate;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Upper bound on how much of an error body is kept in [`ExtractError::Upstream`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    text: TextConfig,
}

#[derive(Serialize)]
struct TextConfig {
    format: TextFormat,
}

#[derive(Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Extraction client. One request per call, no retries.
pub struct ExtractClient {
    client: Client,
    api_key: String,
    model: String,
    responses_url: Url,
}

impl ExtractClient {
    /// Creates a client pointed at the production `OpenAI` API.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ExtractError> {
        Self::with_base_url(api_key, model, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ExtractError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let responses_url = Url::parse(&normalised)
            .and_then(|base| base.join("responses"))
            .map_err(|e| ExtractError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            responses_url,
        })
    }

    /// Extracts an address from the structured ad record.
    ///
    /// The whole record, including fields the resolver does not model, is
    /// serialized as the model input.
    ///
    /// # Errors
    ///
    /// See [`ExtractClient::extract`].
    pub async fn extract_from_ad(&self, ad: &Ad) -> Result<AddressCandidate, ExtractError> {
        let input = serde_json::to_string(ad).map_err(|e| ExtractError::Deserialize {
            context: format!("serialize ad {}", ad.id),
            source: e,
        })?;
        self.extract(AD_RECORD_INSTRUCTIONS, &input).await
    }

    /// Extracts an address from the original listing HTML.
    ///
    /// # Errors
    ///
    /// See [`ExtractClient::extract`].
    pub async fn extract_from_source(&self, html: &str) -> Result<AddressCandidate, ExtractError> {
        self.extract(AD_SOURCE_INSTRUCTIONS, html).await
    }

    /// Sends one schema-constrained extraction request.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Http`] on network failure.
    /// - [`ExtractError::Upstream`] on a non-2xx status.
    /// - [`ExtractError::Refused`] if the model refused.
    /// - [`ExtractError::MissingOutput`] if no output text came back.
    /// - [`ExtractError::Deserialize`] if the response or the output text do
    ///   not match the expected shape.
    pub async fn extract(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<AddressCandidate, ExtractError> {
        let request = ResponsesRequest {
            model: &self.model,
            instructions,
            input,
            text: TextConfig {
                format: TextFormat {
                    kind: "json_schema",
                    name: SCHEMA_NAME,
                    strict: true,
                    schema: address_schema(),
                },
            },
        };

        let response = self
            .client
            .post(self.responses_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let parsed: ResponsesBody =
            serde_json::from_str(&body).map_err(|e| ExtractError::Deserialize {
                context: "responses body".to_owned(),
                source: e,
            })?;

        let text = output_text(&parsed)?;
        let candidate: AddressCandidate =
            serde_json::from_str(&text).map_err(|e| ExtractError::Deserialize {
                context: SCHEMA_NAME.to_owned(),
                source: e,
            })?;

        tracing::debug!(
            address = %candidate.address,
            points_of_interest = candidate.points_of_interest.len(),
            "address extracted"
        );

        Ok(candidate)
    }
}

/// Concatenates every `output_text` part of every message item, the same way
/// the official SDKs build `output_text`.
fn output_text(body: &ResponsesBody) -> Result<String, ExtractError> {
    let mut text = String::new();

    for part in body
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| &item.content)
    {
        match part.kind.as_str() {
            "output_text" => text.push_str(part.text.as_deref().unwrap_or_default()),
            "refusal" => {
                return Err(ExtractError::Refused(
                    part.refusal.clone().unwrap_or_default(),
                ))
            }
            _ => {}
        }
    }

    if text.trim().is_empty() {
        return Err(ExtractError::MissingOutput);
    }
    Ok(text)
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        |envelope| envelope.error.message,
    )
}
