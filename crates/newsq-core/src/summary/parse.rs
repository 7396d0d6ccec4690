//! Request body and response decoding for the generateContent API.

use serde_json::{json, Value};

use super::SummaryError;

/// JSON body for a single-prompt request with conservative output limits.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": 0.7,
            "maxOutputTokens": 500,
            "topP": 0.8,
            "topK": 40
        }
    })
}

/// Decode a response. Non-2xx statuses surface the API's own message when it
/// sends one.
pub fn parse_response(status: u32, body: &[u8]) -> Result<String, SummaryError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|m| !m.is_empty());
        return Err(match message {
            Some(m) => SummaryError::Api(m),
            None => SummaryError::Status(status),
        });
    }

    let value: Value = serde_json::from_slice(body)?;
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(SummaryError::Empty)
}
