//! Mini program HTTP client module
//!
//! This module contains the WeappClient, the URL combiner trait and the
//! unified [`Weapp`] facade.

mod combine;
pub use combine::CombineUrl;

mod weapp_client;
pub use weapp_client::{WeappClient, WeappClientBuilder};

mod weapp;
pub use weapp::Weapp;
