//! Reqwest-based implementation of the [`Transport`] trait.
//!
//! Provides a thin adapter around `reqwest::Client` that issues the action
//! request and decodes the YAML body before handing it back to the client
//! layer.

use async_trait::async_trait;
use http::Method as HttpMethod;
use reqwest::Client;
use url::Url;

use super::{ParamMap, Transport, TransportError, decode_body};
use crate::response::ActionResponse;

/// Reqwest-backed transport used outside of tests.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|err| TransportError::Request(err.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client, e.g. one that already carries a
    /// proxy or timeout configuration.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(
        &self,
        method: &HttpMethod,
        url: &Url,
        params: &ParamMap,
    ) -> Result<ActionResponse, TransportError> {
        let req_method = map_method(method)?;
        let mut builder = self.client.request(req_method, url.as_str());

        builder = if *method == HttpMethod::GET {
            if params.is_empty() {
                builder
            } else {
                builder.query(params)
            }
        } else {
            builder.form(params)
        };

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        decode_body(&body)
    }
}

fn map_method(method: &HttpMethod) -> Result<reqwest::Method, TransportError> {
    reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|err| TransportError::Request(err.to_string()))
}
