//! Error types returned by the Steam Web API client.
//!
//! Every failure of an endpoint call is reported through [`SteamError`]. The
//! variants follow the stage of the pipeline where the call failed:
//!
//! - [`SteamError::MissingApiKey`] - a protected endpoint was called without any key
//! - [`SteamError::Transport`] - the HTTP request itself failed
//! - [`SteamError::Protocol`] - the server answered but not with usable JSON
//! - [`SteamError::InvalidResponse`] - the JSON does not have the expected envelope

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::steam::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, DNS, TLS or timeout failure reported by `reqwest`.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// A header from the transport options cannot be sent.
    #[error("invalid request header {0}")]
    InvalidHeader(String),
    /// The request URL cannot be built from the configured base URL.
    #[error("invalid request url {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while calling a Steam Web API endpoint.
#[derive(Debug, Error)]
pub enum SteamError {
    /// The endpoint requires an API key and neither the call options nor the
    /// client provide one.
    ///
    /// Returned before any network request is made.
    #[error(
        "you must add your steam api key in the client or as option when calling this endpoint"
    )]
    MissingApiKey,

    /// The HTTP request could not be performed.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with something other than a usable JSON document.
    ///
    /// Covers non-200 statuses, a 200 with a non-JSON content type, and bodies
    /// that are not valid JSON or are a falsy JSON value. The message is the
    /// response text when there is one.
    #[error("{message}")]
    Protocol {
        /// HTTP status of the response
        status: u16,
        /// Diagnostic text, usually the raw response body
        message: String,
    },

    /// The JSON response does not contain the payload at the expected place.
    #[error("response body of {endpoint} is invalid: {reason}")]
    InvalidResponse {
        /// Name of the endpoint method, e.g. `GetAppList`
        endpoint: &'static str,
        /// What was wrong with the envelope
        reason: String,
    },
}

impl SteamError {
    /// Builds a [`SteamError::InvalidResponse`] for `endpoint`.
    pub(crate) fn invalid(endpoint: &'static str, reason: impl Into<String>) -> Self {
        SteamError::InvalidResponse {
            endpoint,
            reason: reason.into(),
        }
    }
}
