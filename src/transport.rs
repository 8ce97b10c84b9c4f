//! HTTP transport used to reach the GraphQL endpoint.
//!
//! The fetcher only depends on [`Transport`], so the public relay can be swapped
//! for a direct connection or an in-memory stub.

use futures::{FutureExt, future::BoxFuture};
use reqwest::{Client, redirect};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Status and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport: Send + Sync {
    /// POSTs `body` as `application/json` to `url`.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<RelayResponse, TransportError>>;
}

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<RelayResponse, TransportError>> {
        async move {
            let response = self
                .client
                .post(url)
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            Ok(RelayResponse { status, body })
        }
        .boxed()
    }
}
