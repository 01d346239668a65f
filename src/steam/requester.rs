//! HTTP transport used to reach the Steam Web API.
//!
//! This module provides the [`Transport`] trait, the single primitive the rest
//! of the client relies on, and [`ReqwestTransport`], its implementation on top
//! of `reqwest`.

use std::time::Duration;

use log::debug;
use mockall::automock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};

use crate::error::TransportError;

/// Options passed through to the transport for one request.
///
/// The value is built once with the client configuration and cloned for every
/// request, so a call never observes headers added for another one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Extra request headers as name/value pairs
    pub headers: Vec<(String, String)>,
    /// Maximum duration of the whole request
    ///
    /// `None` keeps the transport default (no timeout for `reqwest`).
    pub timeout: Option<Duration>,
}

/// Raw HTTP response as returned by a [`Transport`].
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

/// Trait for performing the HTTP GET of an endpoint call.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Transport {
    /// Performs one GET request against `url`.
    async fn get(&self, url: &Url, options: &TransportOptions)
    -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
///
/// # Examples
///
/// ```no_run
/// use steam_webapi::steam::{ReqwestTransport, Transport, TransportOptions};
///
/// # async fn example() -> Result<(), anyhow::Error> {
/// let transport = ReqwestTransport::new();
/// let url = "https://api.steampowered.com/ISteamApps/GetAppList/v0002".parse()?;
/// let response = transport.get(&url, &TransportOptions::default()).await?;
/// println!("status {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    /// HTTP client
    client: Client,
}

impl ReqwestTransport {
    /// Create a new [ReqwestTransport].
    pub fn new() -> Self {
        ReqwestTransport {
            client: Client::new(),
        }
    }
}

impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &Url,
        options: &TransportOptions,
    ) -> Result<RawResponse, TransportError> {
        let headers = build_headers(&options.headers)?;

        let mut request = self.client.get(url.clone()).headers(headers);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!("received status {} with {} bytes", status, body.len());

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Converts the option headers into a [`HeaderMap`].
///
/// Fails on the first header whose name or value is not valid HTTP.
fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut header_map = HeaderMap::new();

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidHeader(name.to_owned()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(name.to_owned()))?;
        header_map.append(header_name, header_value);
    }

    Ok(header_map)
}
