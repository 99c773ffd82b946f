use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type FormPairs = Vec<(String, String)>;

pub const GENERIC_NETWORK_ERROR: &str = "Network error. Please try again.";

pub fn form_value<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
    form.iter()
        .rev()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

pub fn pair(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

/// Client-side failure of a request, split the way notifications report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
    #[error("invalid {field}: {message}")]
    Invalid { field: String, message: String },
}

impl FetchError {
    pub fn notice_message(&self, fallback: &str) -> String {
        match self {
            FetchError::Transport(_) => GENERIC_NETWORK_ERROR.to_string(),
            FetchError::Rejected(Some(message)) if !message.trim().is_empty() => message.clone(),
            FetchError::Rejected(_) => fallback.to_string(),
            FetchError::Invalid { message, .. } => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<R> {
    pub rows: Vec<R>,
    pub total_pages: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn parse_envelope(body: &str) -> Result<Value, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| FetchError::Transport(format!("malformed response: {err}")))?;
    let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(field) = value.get("field").and_then(Value::as_str) {
            return Err(FetchError::Invalid {
                field: field.to_string(),
                message: message.unwrap_or_default(),
            });
        }
        return Err(FetchError::Rejected(message));
    }
    Ok(value)
}

/// Decodes `{success, <rows_key>: [...], total_pages, message?}`.
pub fn parse_list_response<R: DeserializeOwned>(
    body: &str,
    rows_key: &str,
) -> Result<ListPage<R>, FetchError> {
    let mut value = parse_envelope(body)?;
    let rows = match value.get_mut(rows_key).map(Value::take) {
        Some(Value::Null) | None => Vec::new(),
        Some(rows) => serde_json::from_value(rows)
            .map_err(|err| FetchError::Transport(format!("malformed rows: {err}")))?,
    };
    let total_pages = value
        .get("total_pages")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .max(0);
    Ok(ListPage { rows, total_pages })
}

pub fn parse_mutation_response(body: &str) -> Result<MutationResponse, FetchError> {
    let value = parse_envelope(body)?;
    Ok(MutationResponse {
        success: true,
        message: value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Pulls a single typed payload out of a successful envelope, e.g. `candidate` or `options`.
pub fn parse_payload<T: DeserializeOwned>(body: &str, key: &str) -> Result<T, FetchError> {
    let mut value = parse_envelope(body)?;
    let payload = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| FetchError::Transport(format!("response is missing `{key}`")))?;
    serde_json::from_value(payload)
        .map_err(|err| FetchError::Transport(format!("malformed `{key}`: {err}")))
}
