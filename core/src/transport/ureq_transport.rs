//! Transport backed by the blocking `ureq` client.
//!
//! Each round-trip runs on tokio's blocking pool, so the calling task stays
//! cancellable and the executor thread is never parked. An aborted request
//! is abandoned, not interrupted: its blocking call runs until ureq's own
//! timeout and the result is dropped.

use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

use super::Transport;

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Status codes are reported as data; the client interprets them.
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || round_trip(&agent, &request))
            .await
            .map_err(|e| TransportError::Other(Box::new(e)))?
    }
}

fn round_trip(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let body = request.body.as_deref();
    let result = match request.method {
        HttpMethod::Get => with_parts(agent.get(&request.url), request).call(),
        HttpMethod::Delete => with_parts(agent.delete(&request.url), request).call(),
        HttpMethod::Post => {
            let builder = with_parts(agent.post(&request.url), request);
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
        HttpMethod::Put => {
            let builder = with_parts(agent.put(&request.url), request);
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    match result {
        Ok(response) => convert_response(response),
        Err(ureq::Error::Timeout(_)) => Err(TransportError::Timeout),
        Err(ureq::Error::HostNotFound) => Err(TransportError::connection("host not found")),
        Err(ureq::Error::ConnectionFailed) => Err(TransportError::connection("connection failed")),
        Err(ureq::Error::Io(e)) => Err(TransportError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }),
        Err(e) => Err(TransportError::Other(Box::new(e))),
    }
}

fn with_parts<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.query_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

fn convert_response(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::Other(Box::new(e)))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
