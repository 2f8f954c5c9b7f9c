//! Typed HTTP client for the backend API.
//!
//! # Overview
//! All outbound requests go through one `ApiClient`: it resolves endpoint
//! paths against the base URL from `ClientConfig`, sends them through a
//! `Transport`, and decodes the JSON body into the caller's type.
//!
//! # Design
//! - The base URL is read once, when the client is constructed.
//! - `get`/`post`/`put`/`del` fix the method (and body) through their
//!   signatures; `RequestOptions` cannot carry either.
//! - Request building is pure (`build_url`, `build_request`) so it can be
//!   tested without a network; transports are pluggable (`reqwest` by
//!   default, `ureq` behind a feature).
//! - Failures are surfaced as-is: no retry, no caching, no translation.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, API_BASE_ENV, API_BASE_FALLBACK_ENV};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::{AbortController, AbortSignal, FetchOptions, RequestOptions};
pub use transport::Transport;
#[cfg(feature = "reqwest-client")]
pub use transport::ReqwestTransport;
#[cfg(feature = "ureq-client")]
pub use transport::UreqTransport;
