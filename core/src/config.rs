//! Client configuration.
//!
//! The orchestration host publishes the backend's reachable endpoint in
//! `NUXT_PUBLIC_API_BASE`; `PUBLIC_API_BASE` is accepted when that is unset.
//! The value is read when a `ClientConfig` is built and copied into each
//! `ApiClient` at construction; later changes to the environment are not
//! observed by existing clients.

use serde::{Deserialize, Serialize};

/// Environment variable the orchestration host sets to the backend's
/// public base URL.
pub const API_BASE_ENV: &str = "NUXT_PUBLIC_API_BASE";

/// Read only when `API_BASE_ENV` is unset.
pub const API_BASE_FALLBACK_ENV: &str = "PUBLIC_API_BASE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend API, e.g. `http://localhost:5000`.
    /// Not validated; a bad value surfaces as a transport error on first use.
    #[serde(default)]
    pub api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Read the base URL from the process environment. Unset or non-unicode
    /// values yield an empty base URL.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, for hosts that keep their
    /// environment somewhere other than the process.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_base: lookup(API_BASE_ENV)
                .or_else(|| lookup(API_BASE_FALLBACK_ENV))
                .unwrap_or_default(),
        }
    }
}
