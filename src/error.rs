use thiserror::Error;

/// Mini program SDK error types
#[derive(Debug, Error)]
pub enum WeappError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WeChat API error (code={code}): {message}")]
    Api { code: i32, message: String },

    #[error("Access token error: {0}")]
    Token(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(String),
}

impl WeappError {
    /// Turn a non-zero `errcode` into [`WeappError::Api`].
    pub fn check_api(errcode: i32, errmsg: &str) -> Result<(), WeappError> {
        if errcode == 0 {
            return Ok(());
        }
        Err(WeappError::Api {
            code: errcode,
            message: errmsg.to_string(),
        })
    }

    /// Returns the WeChat errcode when this is an API error.
    pub fn api_code(&self) -> Option<i32> {
        match self {
            WeappError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
