//! Typed async client for the Steam Web API.
//!
//! The crate wraps the endpoints of `api.steampowered.com` behind typed
//! methods of [`steam::SteamClient`]. Each call builds the request url of its
//! endpoint, attaches the API key when the endpoint is protected, performs a
//! single GET and unwraps the JSON envelope into a typed result.
//!
//! There is no retry, rate limiting or caching: one call is one request, and
//! every failure is returned as a [`SteamError`].
//!
//! # Architecture
//!
//! - [`config`] - YAML configuration file with environment variable overrides
//! - [`error`] - Error types of the client
//! - [`steam`] - Endpoint client, request pipeline and returned records

pub mod config;
pub mod error;
pub mod steam;

pub use crate::error::{SteamError, TransportError};
