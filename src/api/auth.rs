//! Mini program login and user identity API
//!
//! # Endpoints
//!
//! - [`AuthApi::code2session`] - Exchange a `wx.login()` code for a session
//! - [`AuthApi::get_paid_unionid`] - UnionID of a user who completed a payment
//! - [`AuthApi::check_session_key`] - Verify a cached session_key is still valid

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{WeappApi, WeappContext};
use crate::client::{CombineUrl, WeappClient};
use crate::error::WeappError;

/// Login response from code2Session
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    /// User's unique ID under the mini program
    #[serde(default)]
    pub openid: String,
    /// Session key for decrypting user data
    #[serde(default)]
    pub session_key: String,
    /// User's unique ID across the open platform (optional)
    #[serde(default)]
    pub unionid: Option<String>,
}

/// Response from getPaidUnionid
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaidUnionIdResponse {
    #[serde(default)]
    pub unionid: String,
}

/// Authentication API
#[derive(Debug)]
pub struct AuthApi {
    context: WeappContext,
}

impl AuthApi {
    /// Create a new AuthApi from the request helper and URL combiner
    pub fn new(request: Arc<WeappClient>, combine: Arc<dyn CombineUrl>) -> Self {
        Self {
            context: WeappContext::new(request, combine),
        }
    }

    /// Login with code from wx.login()
    ///
    /// GET /sns/jscode2session
    ///
    /// Authenticates with appid + secret; no access_token is sent.
    pub async fn code2session(&self, js_code: &str) -> Result<LoginResponse, WeappError> {
        let params = json!({
            "appid": self.context.request.appid(),
            "secret": self.context.request.secret(),
            "js_code": js_code,
            "grant_type": "authorization_code",
        });
        self.context
            .get("/sns/jscode2session", &params, false)
            .await
    }

    /// Get the UnionID of a user after payment
    ///
    /// GET /wxa/getpaidunionid?access_token=ACCESS_TOKEN
    ///
    /// # Arguments
    /// * `openid` - User's OpenID
    /// * `transaction_id` - WeChat Pay order number
    pub async fn get_paid_unionid(
        &self,
        openid: &str,
        transaction_id: &str,
    ) -> Result<PaidUnionIdResponse, WeappError> {
        let params = json!({
            "openid": openid,
            "transaction_id": transaction_id,
        });
        self.context.get("/wxa/getpaidunionid", &params, true).await
    }

    /// Check whether a session_key is still valid
    ///
    /// GET /wxa/checksession?access_token=ACCESS_TOKEN
    ///
    /// `signature` is the hex HMAC-SHA256 of an empty string keyed with the
    /// session_key, computed by the caller.
    pub async fn check_session_key(
        &self,
        openid: &str,
        signature: &str,
    ) -> Result<(), WeappError> {
        let params = json!({
            "openid": openid,
            "signature": signature,
            "sig_method": "hmac_sha256",
        });
        let _: Value = self.context.get("/wxa/checksession", &params, true).await?;
        Ok(())
    }
}

impl WeappApi for AuthApi {
    fn context(&self) -> &WeappContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "auth"
    }
}
