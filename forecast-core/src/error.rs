use thiserror::Error;

/// Failures surfaced by the forecast client.
///
/// Nothing is retried or recovered here; every variant propagates to the
/// caller as-is.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The transport could not reach the provider, or timed out.
    #[error("failed to reach the forecast provider: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("forecast request failed with status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not well-formed JSON.
    #[error("failed to parse forecast response: {0}")]
    Parse(serde_json::Error),

    /// The response was well-formed but missing an expected grouping or
    /// field, or a row carried an unusable timestamp.
    #[error("forecast response is missing expected data: {0}")]
    Schema(String),
}

impl ForecastError {
    /// Split a `serde_json` failure into the taxonomy: syntax-level
    /// problems mean the body was not JSON at all, data-level problems
    /// mean a required grouping or field was absent or mistyped.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => ForecastError::Schema(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => ForecastError::Parse(err),
        }
    }
}

/// Cap provider bodies quoted in error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
