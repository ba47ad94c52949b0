use std::fmt;

use serde::{Deserialize, Serialize};

/// Mini program AppID (18 characters, `wx` prefix)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if !id.starts_with("wx") {
            return Err(format!("AppId must start with 'wx', got {}", id));
        }
        if id.len() != 18 {
            return Err(format!("AppId must be 18 characters, got {}", id.len()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mini program AppSecret
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppSecret(String);

impl AppSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, String> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err("AppSecret must not be empty".to_string());
        }
        Ok(Self(secret))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret([REDACTED])")
    }
}

/// Interface call credential appended as the `access_token` query parameter
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        if token.is_empty() {
            return Err("AccessToken must not be empty".to_string());
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_id_valid() {
        let id = "wx1234567890abcdef".to_string();
        let app_id = AppId::new(id.clone()).unwrap();
        assert_eq!(app_id.as_str(), id);
    }

    #[test]
    fn test_app_id_invalid_length() {
        let result = AppId::new("wxshort");
        assert!(result.unwrap_err().contains("18 characters"));
    }

    #[test]
    fn test_app_id_invalid_prefix() {
        let result = AppId::new("abcdefghijklmnopqr");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("must start with 'wx'"));
    }

    #[test]
    fn test_app_secret_empty() {
        assert!(AppSecret::new("").is_err());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = AppSecret::new("super_secret_value").unwrap();
        let token = AccessToken::new("token_value").unwrap();
        assert!(!format!("{:?}", secret).contains("super_secret_value"));
        assert!(!format!("{:?}", token).contains("token_value"));
    }

    #[test]
    fn test_access_token_empty() {
        assert!(AccessToken::new("").is_err());
    }
}
