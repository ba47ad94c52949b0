//! WeChat Mini Program SDK for Rust
//!
//! Thin clients for the mini program server API plus a small colored,
//! leveled console logger.
//!
//! ## API Coverage
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | Auth | 3 |
//! | Operation | 7 |
//! | Security | 3 |
//!
//! Every module holds the shared HTTP request helper and a URL combiner. The
//! combiner appends the access_token for endpoints that need it. Obtaining
//! and refreshing that token is left to the application, which hands it to
//! [`WeappClient::set_access_token`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weapp_sdk::{Weapp, logger::{Level, LevelLogger}};
//! use weapp_sdk::types::{AccessToken, AppId, AppSecret};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = Arc::new(LevelLogger::console(Level::Warn, true));
//!     let weapp = Weapp::new(
//!         Weapp::builder()
//!             .appid(AppId::new("wx1234567890abcdef")?)
//!             .secret(AppSecret::new("your_secret")?)
//!             .access_token(AccessToken::new("token_from_your_cache")?)
//!             .logger(logger)
//!             .build()?,
//!     );
//!
//!     let session = weapp.auth().code2session("code_from_wx_login").await?;
//!     println!("OpenID: {}", session.openid);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Mini program API modules (auth, operation, security)
//! - [`client`] - HTTP client, URL combiner and the [`Weapp`] facade
//! - [`error`] - Error types
//! - [`logger`] - Leveled colored logger
//! - [`types`] - Validated identifier types
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use weapp_sdk::WeappError;
//!
//! match result {
//!     Ok(response) => { /* handle success */ }
//!     Err(WeappError::Api { code, message }) => {
//!         eprintln!("API error: {} - {}", code, message);
//!     }
//!     Err(WeappError::Token(e)) => {
//!         eprintln!("No access token: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod logger;
pub mod types;

pub use client::{CombineUrl, Weapp, WeappClient, WeappClientBuilder};
pub use error::WeappError;
pub use logger::{Level, LevelLogger, Logger};
