//! Operation and maintenance API
//!
//! Domain configuration, performance data, realtime logs, user feedback and
//! JS error reports.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{WeappApi, WeappContext};
use crate::client::{CombineUrl, WeappClient};
use crate::error::WeappError;

/// Free-form request payload.
///
/// Sent as the JSON body for POST endpoints and as query parameters for GET
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationRequest {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl OperationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    fn to_params(&self) -> Value {
        Value::Object(self.payload.clone())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperationResponse {
    #[serde(default)]
    pub(crate) errcode: i32,
    #[serde(default)]
    pub(crate) errmsg: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl OperationResponse {
    pub fn errmsg(&self) -> &str {
        &self.errmsg
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

#[derive(Debug)]
pub struct OperationApi {
    context: WeappContext,
}

impl OperationApi {
    pub fn new(request: Arc<WeappClient>, combine: Arc<dyn CombineUrl>) -> Self {
        Self {
            context: WeappContext::new(request, combine),
        }
    }

    /// POST /wxa/get_wxa_domain
    ///
    /// `action` filters the result (for example `"getbizdomain"`); `None`
    /// returns every domain list.
    pub async fn get_domain_info(
        &self,
        action: Option<&str>,
    ) -> Result<OperationResponse, WeappError> {
        let body = match action {
            Some(action) => json!({ "action": action }),
            None => json!({}),
        };
        self.post("/wxa/get_wxa_domain", &body).await
    }

    /// POST /wxaapi/log/get_performance
    pub async fn get_performance(
        &self,
        request: &OperationRequest,
    ) -> Result<OperationResponse, WeappError> {
        self.post("/wxaapi/log/get_performance", request).await
    }

    /// GET /wxaapi/log/get_scene
    pub async fn get_scene_list(&self) -> Result<OperationResponse, WeappError> {
        self.get("/wxaapi/log/get_scene", &Value::Null).await
    }

    /// GET /wxaapi/log/get_client_version
    pub async fn get_version_list(&self) -> Result<OperationResponse, WeappError> {
        self.get("/wxaapi/log/get_client_version", &Value::Null)
            .await
    }

    /// GET /wxaapi/userlog/userlog_search
    pub async fn realtime_log_search(
        &self,
        request: &OperationRequest,
    ) -> Result<OperationResponse, WeappError> {
        self.get("/wxaapi/userlog/userlog_search", &request.to_params())
            .await
    }

    /// GET /wxaapi/feedback/list
    pub async fn get_feedback(
        &self,
        request: &OperationRequest,
    ) -> Result<OperationResponse, WeappError> {
        self.get("/wxaapi/feedback/list", &request.to_params())
            .await
    }

    /// POST /wxaapi/log/jserr_list
    pub async fn get_js_err_list(
        &self,
        request: &OperationRequest,
    ) -> Result<OperationResponse, WeappError> {
        self.post("/wxaapi/log/jserr_list", request).await
    }

    async fn get(&self, endpoint: &str, params: &Value) -> Result<OperationResponse, WeappError> {
        self.context.get(endpoint, params, true).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<OperationResponse, WeappError> {
        self.context.post(endpoint, body, true).await
    }
}

impl WeappApi for OperationApi {
    fn context(&self) -> &WeappContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "operation"
    }
}
