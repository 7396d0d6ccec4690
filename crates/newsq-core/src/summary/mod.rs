//! Optional AI summary of a search's intent.
//!
//! The summary is requested after the URL is built and never affects it. A
//! failed request is reported to the user and the search carries on.

mod gemini;
mod parse;
mod prompt;

pub use gemini::{GeminiClient, GEMINI_ENDPOINT};
pub use parse::{parse_response, request_body};
pub use prompt::build_prompt;

/// What the summary is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Display query (`a AND b`).
    pub query: String,
    /// Country label.
    pub country: String,
    pub date_range: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("API key not configured")]
    MissingApiKey,
    /// Message returned by the API in its error body.
    #[error("{0}")]
    Api(String),
    #[error("API error: {0}")]
    Status(u32),
    #[error("No summary generated")]
    Empty,
    #[error("summary request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("invalid summary response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Produces a short text summary for a search.
pub trait Summarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String, SummaryError>;
}
