//! # APIM Auth Library
//!
//! Provides the authentication core for integration tests against an
//! APIM-fronted API: OAuth2 client-credentials token acquisition with
//! caching, retry and backoff, a passthrough mode for pre-issued tokens,
//! and an HTTP client that attaches the resulting bearer token to
//! business-endpoint requests.
//!
//! Modules:
//! - `config` — credential set and provider settings
//! - `cache` — token cache with expiry-aware reads
//! - `auth` — auth modes, token endpoint request, TokenProvider
//! - `resilience` — bounded retry with exponential backoff and jitter
//! - `client` — authenticated API client for business endpoints

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod helpers;
pub mod resilience;
pub mod tests;
pub mod utils;

pub use crate::auth::provider::TokenProvider;
pub use crate::auth::{AuthMode, PassthroughToken};
pub use crate::client::api_client::ApiClient;
pub use crate::config::credentials::Credentials;
pub use crate::config::settings::ProviderSettings;
pub use crate::error::TokenError;
