use std::time::Duration;

use crate::capabilities::{HttpClient, HttpResponse};
use crate::error::{OtaError, Result};

/// Production [`HttpClient`] over a blocking reqwest client.
#[derive(Clone)]
pub struct BlockingHttpClient {
    client: reqwest::blocking::Client,
}

impl BlockingHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Wrap a pre-configured client (proxy, TLS settings, ...).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for BlockingHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for BlockingHttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)], timeout: Duration) -> Result<HttpResponse> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .map_err(|err| OtaError::transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| OtaError::transport(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
