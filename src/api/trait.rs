//! Mini program API trait and context
//!
//! Provides the base trait and context for all API module implementations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::{CombineUrl, WeappClient};
use crate::error::WeappError;

/// Shared resources for an API module: the request helper and the URL
/// combiner.
#[derive(Clone)]
pub struct WeappContext {
    pub(crate) request: Arc<WeappClient>,
    pub(crate) combine: Arc<dyn CombineUrl>,
}

impl std::fmt::Debug for WeappContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeappContext")
            .field("request", &self.request)
            .field("combine", &"CombineUrl { .. }")
            .finish()
    }
}

impl WeappContext {
    pub fn new(request: Arc<WeappClient>, combine: Arc<dyn CombineUrl>) -> Self {
        Self { request, combine }
    }

    /// Get a reference to the HTTP request helper.
    pub fn request(&self) -> &WeappClient {
        &self.request
    }

    /// Get a reference to the URL combiner.
    pub fn combine(&self) -> &dyn CombineUrl {
        self.combine.as_ref()
    }

    /// GET `path` with `params` encoded into the query string.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Value,
        with_token: bool,
    ) -> Result<T, WeappError> {
        let url = self.combine.combine_url(path, params, with_token)?;
        self.request.get_json(&url).await
    }

    /// POST `body` as JSON to `path`.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        with_token: bool,
    ) -> Result<T, WeappError> {
        let url = self.combine.combine_url(path, &Value::Null, with_token)?;
        self.request.post_json(&url, body).await
    }
}

/// Trait for API module implementations.
pub trait WeappApi: Send + Sync {
    /// Get a reference to the module context
    fn context(&self) -> &WeappContext;

    /// Name of this API for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
