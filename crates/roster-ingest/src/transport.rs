//! The network seam.
//!
//! Everything above this module sees only [`Transport`]; tests swap in the
//! scripted implementation from [`crate::testing`].

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use roster_model::FetchOptions;
use tracing::debug;

use crate::error::{FetchError, Result};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Opaque "GET this URL" capability.
pub trait Transport {
    fn get(&self, url: &str) -> Result<TransportResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<TransportResponse> {
        (**self).get(url)
    }
}

/// Blocking `reqwest` client with the configured timeout and user agent.
pub struct ReqwestTransport {
    client: Client,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.request_timeout())
            .build()
            .map_err(|err| FetchError::InvalidRequest(err.to_string()))?;
        Ok(Self {
            client,
            user_agent: options.user_agent.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<TransportResponse> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "text/html,application/json")
            .send()
            .map_err(|err| classify(url, &err))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|err| classify(url, &err))?;
        Ok(TransportResponse { status, body })
    }
}

fn classify(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_builder() {
        FetchError::InvalidRequest(format!("{url}: {err}"))
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
