//! Summary client for the Gemini generateContent endpoint (libcurl).

use std::time::Duration;

use url::form_urlencoded;

use super::{build_prompt, parse_response, request_body, Summarizer, SummaryError, SummaryRequest};

pub const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: GEMINI_ENDPOINT.to_string(),
        }
    }

    /// Point the client at another endpoint (e.g. a proxy).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_url(&self) -> String {
        let key: String = form_urlencoded::byte_serialize(self.api_key.as_bytes()).collect();
        format!("{}?key={}", self.endpoint, key)
    }
}

impl Summarizer for GeminiClient {
    /// Blocking; call from `spawn_blocking` if used from async code.
    fn summarize(&self, request: &SummaryRequest) -> Result<String, SummaryError> {
        if self.api_key.trim().is_empty() {
            return Err(SummaryError::MissingApiKey);
        }
        let body = serde_json::to_vec(&request_body(&build_prompt(request)))?;

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.request_url())?;
        easy.post(true)?;
        easy.post_fields_copy(&body)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(60))?;

        let mut headers = curl::easy::List::new();
        headers.append("Content-Type: application/json")?;
        easy.http_headers(headers)?;

        let mut response = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(status, bytes = response.len(), "summary response received");
        parse_response(status, &response)
    }
}
