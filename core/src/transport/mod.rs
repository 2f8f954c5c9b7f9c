//! Pluggable transports that execute an `HttpRequest`.
//!
//! A transport performs exactly one round-trip per `send` and reports every
//! HTTP status as data. Only failures that prevent a response from arriving
//! are errors.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[cfg(feature = "reqwest-client")]
mod reqwest_transport;
#[cfg(feature = "reqwest-client")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "ureq-client")]
mod ureq_transport;
#[cfg(feature = "ureq-client")]
pub use ureq_transport::UreqTransport;

/// Executes requests built by `ApiClient`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        T::send(self, request)
    }
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        T::send(self, request)
    }
}
