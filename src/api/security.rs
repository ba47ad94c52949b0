//! Security API
//!
//! Endpoints for content security checks including text, media, and user risk assessment.
//!
//! # Endpoints
//!
//! - [`SecurityApi::msg_sec_check`] - Check text content for policy violations
//! - [`SecurityApi::media_check_async`] - Async check media for policy violations
//! - [`SecurityApi::get_user_risk_rank`] - Get user risk rank score

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{WeappApi, WeappContext};
use crate::client::{CombineUrl, WeappClient};
use crate::error::WeappError;

const CHECK_VERSION: u8 = 2;

// ============================================================================
// Request Types (internal)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
struct MsgSecCheckRequest<'a> {
    version: u8,
    openid: &'a str,
    scene: u8,
    content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct MediaCheckAsyncRequest<'a> {
    media_url: &'a str,
    media_type: u8,
    version: u8,
    openid: &'a str,
    scene: u8,
}

#[derive(Debug, Clone, Serialize)]
struct UserRiskRankRequest<'a> {
    appid: &'a str,
    openid: &'a str,
    scene: u8,
    #[serde(flatten)]
    options: UserRiskRankOptions,
}

// ============================================================================
// Public Types
// ============================================================================

/// Detail item from message security check
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MsgSecCheckDetail {
    /// Strategy used
    #[serde(default)]
    pub strategy: String,
    /// Error code for this detail
    #[serde(default)]
    pub errcode: i32,
    /// Suggestion: "pass", "risky", or "review"
    #[serde(default)]
    pub suggest: String,
    /// Label classification (100=normal, 10001=ad, etc.)
    #[serde(default)]
    pub label: i32,
    /// Matched keyword (if any)
    #[serde(default)]
    pub keyword: String,
    /// Confidence probability (0-100)
    #[serde(default)]
    pub prob: i32,
}

/// Result summary from message security check
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MsgSecCheckResult {
    /// Suggestion: "pass", "risky", or "review"
    #[serde(default)]
    pub suggest: String,
    /// Label classification
    #[serde(default)]
    pub label: i32,
}

/// Response from msgSecCheck
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MsgSecCheckResponse {
    #[serde(default)]
    pub result: MsgSecCheckResult,
    #[serde(default)]
    pub detail: Vec<MsgSecCheckDetail>,
    #[serde(default)]
    pub trace_id: String,
}

/// Response from mediaCheckAsync
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaCheckAsyncResponse {
    /// Trace ID matched against the asynchronous result push
    #[serde(default)]
    pub trace_id: String,
}

/// Response from getUserRiskRank
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserRiskRankResponse {
    /// Risk rank: 0-4 (0=no risk, 4=highest risk)
    #[serde(default)]
    pub risk_rank: i32,
    /// Union ID (the API spells the field "unoin_id")
    #[serde(default)]
    pub unoin_id: i64,
}

/// Options for getUserRiskRank
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserRiskRankOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_test: Option<bool>,
}

impl UserRiskRankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    pub fn mobile_no(mut self, mobile: impl Into<String>) -> Self {
        self.mobile_no = Some(mobile.into());
        self
    }

    pub fn email_address(mut self, email: impl Into<String>) -> Self {
        self.email_address = Some(email.into());
        self
    }

    pub fn extended_info(mut self, info: impl Into<String>) -> Self {
        self.extended_info = Some(info.into());
        self
    }

    pub fn is_test(mut self, is_test: bool) -> Self {
        self.is_test = Some(is_test);
        self
    }
}

// ============================================================================
// SecurityApi
// ============================================================================

/// Security API
///
/// Provides methods for content security checks including text, media,
/// and user risk assessment.
#[derive(Debug)]
pub struct SecurityApi {
    context: WeappContext,
}

impl SecurityApi {
    /// Create a new SecurityApi from the request helper and URL combiner
    pub fn new(request: Arc<WeappClient>, combine: Arc<dyn CombineUrl>) -> Self {
        Self {
            context: WeappContext::new(request, combine),
        }
    }

    /// Check text content for policy violations
    ///
    /// POST /wxa/msg_sec_check?access_token=ACCESS_TOKEN
    ///
    /// # Arguments
    /// * `openid` - User's OpenID
    /// * `scene` - Scene value (1=profile, 2=comment, 3=forum, 4=social log)
    /// * `content` - Text content to check
    pub async fn msg_sec_check(
        &self,
        openid: &str,
        scene: u8,
        content: &str,
    ) -> Result<MsgSecCheckResponse, WeappError> {
        let body = MsgSecCheckRequest {
            version: CHECK_VERSION,
            openid,
            scene,
            content,
        };
        self.context.post("/wxa/msg_sec_check", &body, true).await
    }

    /// Async check media (image/audio) for policy violations
    ///
    /// POST /wxa/media_check_async?access_token=ACCESS_TOKEN
    ///
    /// # Arguments
    /// * `openid` - User's OpenID
    /// * `scene` - Scene value
    /// * `media_url` - URL of the media to check
    /// * `media_type` - Media type (1=audio, 2=image)
    pub async fn media_check_async(
        &self,
        openid: &str,
        scene: u8,
        media_url: &str,
        media_type: u8,
    ) -> Result<MediaCheckAsyncResponse, WeappError> {
        let body = MediaCheckAsyncRequest {
            media_url,
            media_type,
            version: CHECK_VERSION,
            openid,
            scene,
        };
        self.context
            .post("/wxa/media_check_async", &body, true)
            .await
    }

    /// Get user risk rank score
    ///
    /// POST /wxa/getuserriskrank?access_token=ACCESS_TOKEN
    ///
    /// # Arguments
    /// * `openid` - User's OpenID
    /// * `scene` - Scene value (0=registration, 1=marketing)
    /// * `options` - Additional optional parameters
    pub async fn get_user_risk_rank(
        &self,
        openid: &str,
        scene: u8,
        options: Option<UserRiskRankOptions>,
    ) -> Result<UserRiskRankResponse, WeappError> {
        let body = UserRiskRankRequest {
            appid: self.context.request.appid(),
            openid,
            scene,
            options: options.unwrap_or_default(),
        };
        self.context
            .post("/wxa/getuserriskrank", &body, true)
            .await
    }
}

impl WeappApi for SecurityApi {
    fn context(&self) -> &WeappContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "security"
    }
}

// ============================================================================
// Tests
// ============================================================================
