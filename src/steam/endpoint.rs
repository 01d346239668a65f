//! Registry of the supported Steam Web API endpoints.
//!
//! Each endpoint is bound to a fixed `(interface, method, version)` triple and
//! to whether it needs an API key. The wire protocol is version sensitive, so
//! the pinned versions must be kept as they are.

use std::fmt;

use reqwest::Url;

use crate::error::TransportError;

/// Default Steam Web API host.
pub const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

/// Version used by every endpoint that does not pin an older one.
pub const DEFAULT_VERSION: &str = "v0002";

/// A remote operation of the Steam Web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetAppList,
    GetServersAtAddress,
    GetNewsForApp,
    GetGlobalAchievementPercentagesForApp,
    GetPlayerSummaries,
    GetFriendList,
    GetPlayerAchievements,
    GetUserStatsForGame,
    GetNumberOfCurrentPlayers,
    GetOwnedGames,
    GetRecentlyPlayedGames,
    GetSchemaForGame,
}

impl Endpoint {
    /// Every supported endpoint.
    pub const ALL: [Endpoint; 12] = [
        Endpoint::GetAppList,
        Endpoint::GetServersAtAddress,
        Endpoint::GetNewsForApp,
        Endpoint::GetGlobalAchievementPercentagesForApp,
        Endpoint::GetPlayerSummaries,
        Endpoint::GetFriendList,
        Endpoint::GetPlayerAchievements,
        Endpoint::GetUserStatsForGame,
        Endpoint::GetNumberOfCurrentPlayers,
        Endpoint::GetOwnedGames,
        Endpoint::GetRecentlyPlayedGames,
        Endpoint::GetSchemaForGame,
    ];

    /// Interface segment of the path, e.g. `ISteamUser`.
    pub fn interface(self) -> &'static str {
        match self {
            Endpoint::GetAppList | Endpoint::GetServersAtAddress => "ISteamApps",
            Endpoint::GetNewsForApp => "ISteamNews",
            Endpoint::GetPlayerSummaries | Endpoint::GetFriendList => "ISteamUser",
            Endpoint::GetGlobalAchievementPercentagesForApp
            | Endpoint::GetPlayerAchievements
            | Endpoint::GetUserStatsForGame
            | Endpoint::GetNumberOfCurrentPlayers
            | Endpoint::GetSchemaForGame => "ISteamUserStats",
            Endpoint::GetOwnedGames | Endpoint::GetRecentlyPlayedGames => "IPlayerService",
        }
    }

    /// Method segment of the path, e.g. `GetPlayerSummaries`.
    pub fn method(self) -> &'static str {
        match self {
            Endpoint::GetAppList => "GetAppList",
            Endpoint::GetServersAtAddress => "GetServersAtAddress",
            Endpoint::GetNewsForApp => "GetNewsForApp",
            Endpoint::GetGlobalAchievementPercentagesForApp => {
                "GetGlobalAchievementPercentagesForApp"
            }
            Endpoint::GetPlayerSummaries => "GetPlayerSummaries",
            Endpoint::GetFriendList => "GetFriendList",
            Endpoint::GetPlayerAchievements => "GetPlayerAchievements",
            Endpoint::GetUserStatsForGame => "GetUserStatsForGame",
            Endpoint::GetNumberOfCurrentPlayers => "GetNumberOfCurrentPlayers",
            Endpoint::GetOwnedGames => "GetOwnedGames",
            Endpoint::GetRecentlyPlayedGames => "GetRecentlyPlayedGames",
            Endpoint::GetSchemaForGame => "GetSchemaForGame",
        }
    }

    /// Version segment of the path.
    pub fn version(self) -> &'static str {
        match self {
            Endpoint::GetServersAtAddress
            | Endpoint::GetFriendList
            | Endpoint::GetPlayerAchievements
            | Endpoint::GetNumberOfCurrentPlayers
            | Endpoint::GetOwnedGames
            | Endpoint::GetRecentlyPlayedGames => "v0001",
            _ => DEFAULT_VERSION,
        }
    }

    /// Whether the endpoint only answers requests carrying an API key.
    pub fn needs_key(self) -> bool {
        matches!(
            self,
            Endpoint::GetPlayerSummaries
                | Endpoint::GetFriendList
                | Endpoint::GetPlayerAchievements
                | Endpoint::GetUserStatsForGame
                | Endpoint::GetOwnedGames
                | Endpoint::GetRecentlyPlayedGames
                | Endpoint::GetSchemaForGame
        )
    }

    /// Builds `{base_url}/{interface}/{method}/{version}` without query.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] when `base_url` is not an absolute URL.
    pub fn url(self, base_url: &str) -> Result<Url, TransportError> {
        let raw = format!(
            "{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.interface(),
            self.method(),
            self.version()
        );
        Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.method())
    }
}
