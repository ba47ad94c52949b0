//! Mini program HTTP client
//!
//! Provides the shared request helper used by every API module.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::combine::{append_query, query_pairs, redact_url, CombineUrl};
use crate::error::WeappError;
use crate::logger::Logger;
use crate::types::{AccessToken, AppId, AppSecret};
use crate::{log_error, log_info};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Mini program API client
///
/// Reusable HTTP client for calling the mini program server API.
/// Built with reqwest for async HTTP requests. The access_token is supplied
/// by the application through [`set_access_token`](Self::set_access_token).
pub struct WeappClient {
    http: Client,
    appid: AppId,
    secret: AppSecret,
    base_url: String,
    access_token: RwLock<Option<AccessToken>>,
    logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for WeappClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeappClient")
            .field("appid", &self.appid)
            .field("base_url", &self.base_url)
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl WeappClient {
    /// Create a new client builder
    pub fn builder() -> WeappClientBuilder {
        WeappClientBuilder::default()
    }

    /// Get the appid
    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.as_str()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying [`reqwest::Client`].
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Current access_token, if one has been set.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the access_token used for token-bearing calls.
    pub fn set_access_token(&self, token: AccessToken) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear_access_token(&self) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Diagnostic logger attached at build time.
    pub fn logger(&self) -> Option<&Arc<dyn Logger>> {
        self.logger.as_ref()
    }

    /// GET `url` and decode the JSON response.
    ///
    /// # Errors
    /// - Returns `WeappError::Http` for transport failures and non-2xx statuses
    /// - Returns `WeappError::Api` when the body carries `errcode != 0`
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeappError> {
        let request = self.http.get(url).build()?;
        self.execute(request).await
    }

    /// POST `body` as JSON to `url` and decode the JSON response.
    ///
    /// # Errors
    /// Same as [`get_json`](Self::get_json).
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, WeappError> {
        let request = self.http.post(url).json(body).build()?;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, WeappError> {
        let method = request.method().as_str().to_string();
        let safe_url = redact_url(request.url().as_str());
        debug!("[weapp] >>> {} {}", method, safe_url);

        let start = Instant::now();
        let result = self.send(request).await;
        let elapsed = start.elapsed();

        if let Some(logger) = &self.logger {
            match &result {
                Ok(_) => log_info!(logger, "{} {} ({:?})", method, safe_url, elapsed),
                Err(e) => log_error!(logger, "{} {} failed: {}", method, safe_url, e),
            }
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, WeappError> {
        let response = self
            .http
            .execute(request)
            .await
            .map_err(reqwest::Error::without_url)?;
        debug!("[weapp] <<< {}", response.status().as_u16());

        if let Err(e) = response.error_for_status_ref() {
            return Err(e.without_url().into());
        }

        let value: Value = response.json().await.map_err(reqwest::Error::without_url)?;

        if let Some(errcode) = value.get("errcode").and_then(Value::as_i64) {
            let errmsg = value
                .get("errmsg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            WeappError::check_api(errcode.try_into().unwrap_or(i32::MAX), errmsg)?;
        }

        Ok(serde_json::from_value(value)?)
    }
}

impl CombineUrl for WeappClient {
    fn combine_url(
        &self,
        path: &str,
        params: &Value,
        with_token: bool,
    ) -> Result<String, WeappError> {
        let mut pairs = query_pairs(params)?;
        if with_token {
            let token = self
                .access_token()
                .ok_or_else(|| WeappError::Token("access token is not set".to_string()))?;
            pairs.push(("access_token".to_string(), token.as_str().to_string()));
        }

        let mut url = format!("{}{}", self.base_url, path);
        append_query(&mut url, &pairs);

        reqwest::Url::parse(&url).map_err(|e| WeappError::Url(format!("{}: {e}", redact_url(&url))))?;
        Ok(url)
    }
}

/// Builder for WeappClient
///
/// # Example
///
/// ```rust
/// use weapp_sdk::client::WeappClient;
/// use weapp_sdk::types::{AccessToken, AppId, AppSecret};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = WeappClient::builder()
///         .appid(AppId::new("wx1234567890abcdef")?)
///         .secret(AppSecret::new("abc1234567890abcdef")?)
///         .access_token(AccessToken::new("token")?)
///         .build()?;
///
///     assert_eq!(client.appid(), "wx1234567890abcdef");
///     Ok(())
/// }
/// ```
#[derive(Default)]
pub struct WeappClientBuilder {
    appid: Option<AppId>,
    secret: Option<AppSecret>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    access_token: Option<AccessToken>,
    logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for WeappClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeappClientBuilder")
            .field("appid", &self.appid)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl WeappClientBuilder {
    /// Set the mini program AppID
    pub fn appid(mut self, appid: AppId) -> Self {
        self.appid = Some(appid);
        self
    }

    /// Set the mini program AppSecret
    pub fn secret(mut self, secret: AppSecret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Set the base URL for API calls
    ///
    /// Default: `<https://api.weixin.qq.com>`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Initial access_token
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Logger receiving one line per request
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Build the WeappClient
    ///
    /// # Errors
    /// Returns an error if appid or secret is not set
    pub fn build(self) -> Result<WeappClient, WeappError> {
        let appid = self
            .appid
            .ok_or_else(|| WeappError::Config("appid is required".to_string()))?;
        let secret = self
            .secret
            .ok_or_else(|| WeappError::Config("secret is required".to_string()))?;

        let base_url = self
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(WeappClient {
            http: client,
            appid,
            secret,
            base_url,
            access_token: RwLock::new(self.access_token),
            logger: self.logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> WeappClient {
        WeappClient::builder()
            .appid(AppId::new("wx1234567890abcdef").unwrap())
            .secret(AppSecret::new("secret1234567890ab").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_default_values() {
        let client = test_client();
        assert_eq!(client.appid(), "wx1234567890abcdef");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert!(client.access_token().is_none());
        assert!(client.logger().is_none());
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = WeappClient::builder()
            .appid(AppId::new("wx1234567890abcdef").unwrap())
            .secret(AppSecret::new("secret1234567890ab").unwrap())
            .base_url("https://custom.api.example.com/")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://custom.api.example.com");
    }

    #[test]
    fn test_builder_missing_appid() {
        let secret = AppSecret::new("secret1234567890ab").unwrap();
        let result = WeappClient::builder().secret(secret).build();
        assert!(matches!(result, Err(WeappError::Config(_))));
    }

    #[test]
    fn test_builder_missing_secret() {
        let appid = AppId::new("wx1234567890abcdef").unwrap();
        let result = WeappClient::builder().appid(appid).build();
        assert!(matches!(result, Err(WeappError::Config(_))));
    }

    #[test]
    fn test_access_token_set_and_clear() {
        let client = test_client();
        client.set_access_token(AccessToken::new("first").unwrap());
        assert_eq!(client.access_token().unwrap().as_str(), "first");

        client.set_access_token(AccessToken::new("second").unwrap());
        assert_eq!(client.access_token().unwrap().as_str(), "second");

        client.clear_access_token();
        assert!(client.access_token().is_none());
    }

    #[test]
    fn test_combine_url_without_token() {
        let client = test_client();
        client.set_access_token(AccessToken::new("tok").unwrap());

        let url = client
            .combine_url("/wxa/path", &json!({"scene": 1}), false)
            .unwrap();
        assert_eq!(url, "https://api.weixin.qq.com/wxa/path?scene=1");
        assert!(!url.contains("access_token"));
    }

    #[test]
    fn test_combine_url_with_token_is_last() {
        let client = test_client();
        client.set_access_token(AccessToken::new("tok en").unwrap());

        let url = client
            .combine_url("/wxa/path", &json!({"a": "1"}), true)
            .unwrap();
        assert_eq!(url, "https://api.weixin.qq.com/wxa/path?a=1&access_token=tok%20en");
    }

    #[test]
    fn test_combine_url_missing_token() {
        let client = test_client();
        let err = client
            .combine_url("/wxa/path", &Value::Null, true)
            .unwrap_err();
        assert!(matches!(err, WeappError::Token(_)));
    }

    #[test]
    fn test_combine_url_rejects_scalar_params() {
        let client = test_client();
        let err = client
            .combine_url("/wxa/path", &json!("oops"), false)
            .unwrap_err();
        assert!(matches!(err, WeappError::Config(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let client = test_client();
        let debug = format!("{:?}", client);
        assert!(debug.contains("wx1234567890abcdef"));
        assert!(!debug.contains("secret1234567890ab"));
    }
}
