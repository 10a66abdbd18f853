use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug)]
pub enum ApiError {
    /// The host could not be reached at all (DNS, refused, TLS, blocked).
    Connect { host: String, source: reqwest::Error },
    Timeout,
    Http(reqwest::Error),
    Status { status: StatusCode, detail: Option<String> },
    Decode(serde_json::Error),
    MissingField(&'static str),
    InvalidUrl(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            let host = err
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("server")
                .to_string();
            ApiError::Connect { host, source: err }
        } else {
            ApiError::Http(err)
        }
    }

    pub(crate) fn from_status(status: StatusCode, body: &Bytes) -> Self {
        ApiError::Status { status, detail: error_detail(body) }
    }

    /// One line suitable for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { detail: Some(detail), .. } => detail.clone(),
            ApiError::Status { status, detail: None } => {
                format!("Request failed with status {}.", status.as_u16())
            }
            ApiError::Connect { host, .. } => format!("Network error: could not reach {host}."),
            ApiError::Timeout => "Request timed out.".to_string(),
            ApiError::Http(err) => format!("Network error: {err}"),
            ApiError::Decode(err) => format!("Unexpected response from server: {err}"),
            ApiError::MissingField(field) => format!("Server response is missing `{field}`."),
            ApiError::InvalidUrl(url) => format!("Invalid URL: {url}"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Connect { host, source } => write!(f, "connect error ({host}): {source}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Http(err) => write!(f, "http error: {err}"),
            ApiError::Status { status, detail } => match detail {
                Some(d) => write!(f, "api error {status}: {d}"),
                None => write!(f, "api error {status}"),
            },
            ApiError::Decode(err) => write!(f, "decode error: {err}"),
            ApiError::MissingField(field) => write!(f, "response missing field `{field}`"),
            ApiError::InvalidUrl(url) => write!(f, "invalid url: {url}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Connect { source, .. } => Some(source),
            ApiError::Http(err) => Some(err),
            ApiError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Server-provided reason from a failed response: `detail` wins over `message`.
pub(crate) fn error_detail(body: &Bytes) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let detail = parsed.detail.and_then(|d| match d {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    });
    detail
        .or(parsed.message)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
