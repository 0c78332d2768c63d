/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public EXIO adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{ApiCredentials, AuthHeaders, CredentialSigner, HmacSigner};

// Re-export commonly used types from http
pub use http::{ClientConfig, ExioClient, ExioError, Result};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    ExioWebSocket,
    FeedCategory,
    FeedConfig,
    FeedHandler,
    FeedMessage,
    LogHandler,
    build_subscribe_request,
};
