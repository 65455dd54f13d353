//! Blocking HTTP transport used by the price client.
//!
//! `HttpClient` is the seam between the price logic and the network: the real
//! implementation wraps `reqwest::blocking::Client`, tests plug in a canned stub.
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::CheckerError;
use crate::result::Result;

/// Performs a GET request and returns the parsed JSON body.
pub trait HttpClient {
    /// GET `path` (relative to the client's base URL) with `query` parameters.
    ///
    /// Non-2xx responses and undecodable bodies are errors.
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// Error body the exchange sends alongside 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    msg: String,
}

/// `HttpClient` backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    base_url: String,
    client: Client,
}

impl ReqwestHttpClient {
    /// Build a client for `base_url` with the given per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pricecheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.msg)
                .unwrap_or(body);
            return Err(CheckerError::Status {
                status: status.as_u16(),
                url,
                message,
            });
        }
        Ok(response.json::<Value>()?)
    }
}
