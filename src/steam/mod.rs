//! Steam Web API integration.
//!
//! This module provides the typed client of the Steam Web API and the pieces
//! of its request pipeline.
//!
//! # Modules
//!
//! - `client` - [`SteamClient`] with one method per endpoint
//! - `endpoint` - Registry of the endpoints with their pinned versions
//! - `envelope` - Unwrapping of the endpoint JSON envelopes
//! - `executor` - Execution of one request and classification of the response
//! - `params` - Endpoint options and query parameter serialization
//! - `requester` - HTTP transport abstraction and its `reqwest` implementation
//! - `structs` - Records returned by the endpoints
//!
//! # Examples
//!
//! ```no_run
//! use steam_webapi::steam::{Relationship, RequestOptions, SteamClient};
//!
//! # async fn example() -> Result<(), steam_webapi::SteamError> {
//! let client = SteamClient::new(Some("your_api_key"));
//! let friends = client
//!     .get_friend_list("76561197960435530", Relationship::Friend, &RequestOptions::default())
//!     .await?;
//! println!("{} friends", friends.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoint;
mod envelope;
mod executor;
mod params;
mod requester;
mod structs;

pub use crate::steam::client::{ClientConfig, SteamClient};
pub use crate::steam::endpoint::{DEFAULT_BASE_URL, DEFAULT_VERSION, Endpoint};
pub use crate::steam::executor::{HttpResponse, Outcome, RequestDescriptor, classify, execute};
pub use crate::steam::params::{
    LanguageOptions, NewsForAppOptions, OwnedGamesOptions, RecentlyPlayedGamesOptions,
    Relationship, RequestOptions, ServersAtAddressOptions,
};
pub use crate::steam::requester::{
    MockTransport, RawResponse, ReqwestTransport, Transport, TransportOptions,
};
pub use crate::steam::structs::{
    Achievement, App, AvailableGameStats, Friend, GameSchema, News, OwnedGame, OwnedGames, Player,
    PlayerAchievement, PlayerStats, RecentlyPlayedGame, RecentlyPlayedGames, SchemaAchievement,
    SchemaStat, Server, Stat, StatAchievement,
};
