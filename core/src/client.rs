//! Typed API client over a pluggable transport.
//!
//! # Design
//! `ApiClient` holds the base URL copied from `ClientConfig` at construction
//! and a `Transport`. Every call goes through `request`: build an
//! `HttpRequest` (pure, see `build_request`), send it once, parse the
//! response into the caller's type. Nothing is retried, cached, logged or
//! translated on the way.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::{FetchOptions, RequestOptions};
use crate::transport::Transport;

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiClient<T: Transport> {
    base_url: String,
    transport: T,
}

#[cfg(feature = "reqwest-client")]
impl ApiClient<crate::transport::ReqwestTransport> {
    /// Client for `NUXT_PUBLIC_API_BASE` over a default `ReqwestTransport`.
    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env(), Default::default())
    }
}

impl<T: Transport> ApiClient<T> {
    /// The base URL is copied here and never refreshed.
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.api_base.clone(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Append the endpoint to the base URL, inserting `/` only when the
    /// endpoint lacks a leading one. The base is used verbatim.
    pub fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    pub fn build_request(&self, endpoint: &str, options: &FetchOptions) -> HttpRequest {
        let mut headers = options.options.headers.clone();
        let body = options.body.as_ref().map(|value| value.to_string());
        if body.is_some() {
            for name in ["content-type", "accept"] {
                if !headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name)) {
                    headers.push((name.to_string(), JSON.to_string()));
                }
            }
        }

        HttpRequest {
            method: options.method,
            url: self.build_url(endpoint),
            headers,
            query: options.options.query.clone(),
            body,
        }
    }

    /// The single dispatch primitive. One transport round-trip per call.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: FetchOptions,
    ) -> Result<R, ApiError> {
        let request = self.build_request(endpoint, &options);
        let response = match options.options.signal {
            Some(signal) => {
                tokio::select! {
                    biased;
                    () = signal.aborted() => Err(TransportError::Aborted),
                    result = self.transport.send(request) => result,
                }
            }
            None => self.transport.send(request).await,
        }?;
        parse_response(response)
    }

    /// Alias for `request`.
    pub async fn fetch<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: FetchOptions,
    ) -> Result<R, ApiError> {
        self.request(endpoint, options).await
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        let options = FetchOptions::new(HttpMethod::Get).options(options);
        self.request(endpoint, options).await
    }

    pub async fn post<R, B>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = with_body(HttpMethod::Post, body, options)?;
        self.request(endpoint, options).await
    }

    pub async fn put<R, B>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = with_body(HttpMethod::Put, body, options)?;
        self.request(endpoint, options).await
    }

    pub async fn del<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        let options = FetchOptions::new(HttpMethod::Delete).options(options);
        self.request(endpoint, options).await
    }
}

fn with_body<B: Serialize + ?Sized>(
    method: HttpMethod,
    body: Option<&B>,
    options: RequestOptions,
) -> Result<FetchOptions, ApiError> {
    let body = body
        .map(serde_json::to_value)
        .transpose()
        .map_err(ApiError::Encode)?;
    Ok(FetchOptions {
        method,
        body,
        options,
    })
}

/// Non-2xx becomes `ApiError::Status`. An empty 2xx body decodes as JSON
/// `null`, so `()` and `Option<_>` accept 204 responses.
fn parse_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            body: response.body,
        });
    }
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(ApiError::Decode)
}
