//! Unified mini program SDK client

use std::sync::Arc;

use crate::api::{AuthApi, OperationApi, SecurityApi};

use super::{CombineUrl, WeappClient, WeappClientBuilder};

/// Unified mini program client
///
/// Wires one shared [`WeappClient`] into every API module, both as the
/// request helper and as the URL combiner.
///
/// # Example
///
/// ```rust,ignore
/// use weapp_sdk::Weapp;
/// use weapp_sdk::types::{AccessToken, AppId, AppSecret};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let weapp = Weapp::new(
///         Weapp::builder()
///             .appid(AppId::new("wx1234567890abcdef")?)
///             .secret(AppSecret::new("your_secret")?)
///             .access_token(AccessToken::new("token_from_your_cache")?)
///             .build()?,
///     );
///
///     let session = weapp.auth().code2session("code").await?;
///     println!("OpenID: {}", session.openid);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Weapp {
    client: Arc<WeappClient>,
    auth: Arc<AuthApi>,
    operation: Arc<OperationApi>,
    security: Arc<SecurityApi>,
}

impl Weapp {
    pub fn builder() -> WeappClientBuilder {
        WeappClient::builder()
    }

    pub fn new(client: WeappClient) -> Self {
        Self::from_shared(Arc::new(client))
    }

    pub fn from_shared(client: Arc<WeappClient>) -> Self {
        let combine: Arc<dyn CombineUrl> = client.clone();
        Self {
            auth: Arc::new(AuthApi::new(client.clone(), combine.clone())),
            operation: Arc::new(OperationApi::new(client.clone(), combine.clone())),
            security: Arc::new(SecurityApi::new(client.clone(), combine)),
            client,
        }
    }

    pub fn client(&self) -> &WeappClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn operation(&self) -> &OperationApi {
        &self.operation
    }

    pub fn security(&self) -> &SecurityApi {
        &self.security
    }
}
