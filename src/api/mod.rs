//! Mini program API modules
//!
//! Each module holds the shared [`WeappClient`](crate::client::WeappClient)
//! request helper and a [`CombineUrl`](crate::client::CombineUrl) combiner,
//! builds the URL (injecting the access_token where the endpoint needs it)
//! and forwards the call.
//!
//! - [`auth`] - Login session exchange and user identity
//! - [`operation`] - Operation and maintenance data
//! - [`security`] - Content security checks
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weapp_sdk::api::SecurityApi;
//!
//! let client = Arc::new(client);
//! let security = SecurityApi::new(client.clone(), client);
//! let verdict = security.msg_sec_check(openid, 2, "hello").await?;
//! ```

pub mod auth;
pub mod operation;
pub mod security;
pub mod r#trait;

pub use auth::{AuthApi, LoginResponse, PaidUnionIdResponse};
pub use operation::{OperationApi, OperationRequest, OperationResponse};
pub use r#trait::{WeappApi, WeappContext};
pub use security::{
    MediaCheckAsyncResponse, MsgSecCheckDetail, MsgSecCheckResponse, MsgSecCheckResult,
    SecurityApi, UserRiskRankOptions, UserRiskRankResponse,
};
