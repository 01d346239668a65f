//! Typed client of the Steam Web API endpoints.
//!
//! This module provides [`SteamClient`], which exposes one async method per
//! supported endpoint. A call goes through the same steps for every endpoint:
//!
//! 1. merge the required arguments and the endpoint options into a parameter set,
//! 2. resolve the API key when the endpoint is protected,
//! 3. build the request url and perform the request through the executor,
//! 4. unwrap the endpoint envelope into the typed result.

use log::{debug, info};
use serde_json::Value;

use crate::error::SteamError;
use crate::steam::endpoint::{DEFAULT_BASE_URL, Endpoint};
use crate::steam::envelope::{unwrap_nested, unwrap_object};
use crate::steam::executor::{RequestDescriptor, execute};
use crate::steam::params::{
    LanguageOptions, NewsForAppOptions, OwnedGamesOptions, ParameterSet,
    RecentlyPlayedGamesOptions, Relationship, RequestOptions, ServersAtAddressOptions,
};
use crate::steam::requester::{ReqwestTransport, Transport, TransportOptions};
use crate::steam::structs::{
    Achievement, App, Friend, GameSchema, News, OwnedGames, Player, PlayerAchievement,
    PlayerStats, RecentlyPlayedGames, Server,
};

/// Configuration of a [`SteamClient`].
///
/// Set once at construction and never mutated afterwards. Per-call
/// [`RequestOptions`] override these defaults for a single request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Default API key used by the protected endpoints
    pub api_key: Option<String>,
    /// Base url of the API, without trailing slash
    pub base_url: String,
    /// Default transport options
    pub transport: TransportOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            transport: TransportOptions::default(),
        }
    }
}

/// Client of the Steam Web API.
///
/// The client holds no mutable state: every method takes `&self` and calls
/// can be issued concurrently from one shared instance.
///
/// # Examples
///
/// ```no_run
/// use steam_webapi::steam::{RequestOptions, SteamClient};
///
/// # async fn example() -> Result<(), steam_webapi::SteamError> {
/// let client = SteamClient::new(Some("your_api_key"));
/// let players = client
///     .get_number_of_current_players(440, &RequestOptions::default())
///     .await?;
/// println!("{} players in game", players);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SteamClient<T: Transport = ReqwestTransport> {
    /// Immutable client configuration
    config: ClientConfig,
    /// HTTP transport
    transport: T,
}

impl SteamClient<ReqwestTransport> {
    /// Create a new [SteamClient] against the public Steam Web API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Default key for the protected endpoints, if any.
    pub fn new(api_key: Option<&str>) -> Self {
        let config = ClientConfig {
            api_key: api_key.map(str::to_owned),
            ..ClientConfig::default()
        };
        Self::with_config(config)
    }

    /// Create a new [SteamClient] from a full configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> SteamClient<T> {
    /// Create a new [SteamClient] using a custom [Transport].
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        SteamClient { config, transport }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request `ISteamApps/GetAppList/v0002` to get every application of the catalog.
    ///
    /// The payload is read from `applist.apps`.
    pub async fn get_app_list(&self, options: &RequestOptions) -> Result<Vec<App>, SteamError> {
        let endpoint = Endpoint::GetAppList;
        let body = self.call(endpoint, ParameterSet::default(), options).await?;
        unwrap_nested(endpoint, body, "applist", "apps")
    }

    /// Request `ISteamApps/GetServersAtAddress/v0001` to get the game servers
    /// running at an IP address.
    ///
    /// The payload is read from `response.servers`.
    ///
    /// # Arguments
    ///
    /// * `addr` - IP address, optionally with a port, e.g. `127.0.0.1:27015`
    pub async fn get_servers_at_address(
        &self,
        addr: &str,
        options: &ServersAtAddressOptions,
    ) -> Result<Vec<Server>, SteamError> {
        let endpoint = Endpoint::GetServersAtAddress;
        let params = ParameterSet {
            addr: Some(addr.to_owned()),
            gmsindex: options.gmsindex,
            appid: options.appid,
            gamedir: options.gamedir.clone(),
            region: options.region,
            secure: options.secure,
            lan: options.lan,
            gameport: options.gameport,
            specport: options.specport,
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_nested(endpoint, body, "response", "servers")
    }

    /// Request `ISteamNews/GetNewsForApp/v0002` to get the latest news of an app.
    ///
    /// The payload is read from `appnews.newsitems`.
    pub async fn get_news_for_app(
        &self,
        appid: u32,
        options: &NewsForAppOptions,
    ) -> Result<Vec<News>, SteamError> {
        let endpoint = Endpoint::GetNewsForApp;
        let params = ParameterSet {
            appid: Some(appid),
            count: options.count,
            maxlength: options.maxlength,
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_nested(endpoint, body, "appnews", "newsitems")
    }

    /// Request `ISteamUserStats/GetGlobalAchievementPercentagesForApp/v0002` to
    /// get the global unlock rate of every achievement of a game.
    ///
    /// The payload is read from `achievementpercentages.achievements`.
    pub async fn get_global_achievement_percentages_for_app(
        &self,
        gameid: u32,
        options: &RequestOptions,
    ) -> Result<Vec<Achievement>, SteamError> {
        let endpoint = Endpoint::GetGlobalAchievementPercentagesForApp;
        let params = ParameterSet {
            gameid: Some(gameid),
            ..Default::default()
        };

        let body = self.call(endpoint, params, options).await?;
        unwrap_nested(endpoint, body, "achievementpercentages", "achievements")
    }

    /// Request `ISteamUser/GetPlayerSummaries/v0002` to get the profiles of
    /// several players. Needs an API key.
    ///
    /// The payload is read from `response.players`. Unknown ids are simply
    /// missing from the result.
    pub async fn get_player_summaries<S: AsRef<str>>(
        &self,
        steamids: &[S],
        options: &RequestOptions,
    ) -> Result<Vec<Player>, SteamError> {
        let steamids = steamids.iter().map(|id| id.as_ref().to_owned()).collect();
        self.request_player_summaries(steamids, options).await
    }

    /// Request `ISteamUser/GetPlayerSummaries/v0002` for a single player.
    /// Needs an API key.
    ///
    /// Returns `None` when no player matches `steamid`.
    pub async fn get_player_summary(
        &self,
        steamid: &str,
        options: &RequestOptions,
    ) -> Result<Option<Player>, SteamError> {
        let players = self
            .request_player_summaries(vec![steamid.to_owned()], options)
            .await?;
        Ok(players.into_iter().next())
    }

    async fn request_player_summaries(
        &self,
        steamids: Vec<String>,
        options: &RequestOptions,
    ) -> Result<Vec<Player>, SteamError> {
        let endpoint = Endpoint::GetPlayerSummaries;
        let params = ParameterSet {
            steamids: Some(steamids),
            ..Default::default()
        };

        let body = self.call(endpoint, params, options).await?;
        unwrap_nested(endpoint, body, "response", "players")
    }

    /// Request `ISteamUser/GetFriendList/v0001` to get the friends of a player.
    /// Needs an API key.
    ///
    /// The payload is read from `friendslist.friends`.
    pub async fn get_friend_list(
        &self,
        steamid: &str,
        relationship: Relationship,
        options: &RequestOptions,
    ) -> Result<Vec<Friend>, SteamError> {
        let endpoint = Endpoint::GetFriendList;
        let params = ParameterSet {
            steamid: Some(steamid.to_owned()),
            relationship: Some(relationship),
            ..Default::default()
        };

        let body = self.call(endpoint, params, options).await?;
        unwrap_nested(endpoint, body, "friendslist", "friends")
    }

    /// Request `ISteamUserStats/GetPlayerAchievements/v0001` to get the
    /// achievements of a player for a game. Needs an API key.
    ///
    /// The payload is read from `playerstats.achievements`.
    pub async fn get_player_achievements(
        &self,
        steamid: &str,
        appid: u32,
        options: &LanguageOptions,
    ) -> Result<Vec<PlayerAchievement>, SteamError> {
        let endpoint = Endpoint::GetPlayerAchievements;
        let params = ParameterSet {
            steamid: Some(steamid.to_owned()),
            appid: Some(appid),
            lang: options.lang.clone(),
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_nested(endpoint, body, "playerstats", "achievements")
    }

    /// Request `ISteamUserStats/GetUserStatsForGame/v0002` to get the stats of
    /// a player for a game. Needs an API key.
    ///
    /// The payload is the whole `playerstats` object.
    pub async fn get_user_stats_for_game(
        &self,
        steamid: &str,
        appid: u32,
        options: &LanguageOptions,
    ) -> Result<PlayerStats, SteamError> {
        let endpoint = Endpoint::GetUserStatsForGame;
        let params = ParameterSet {
            steamid: Some(steamid.to_owned()),
            appid: Some(appid),
            lang: options.lang.clone(),
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_object(endpoint, body, "playerstats")
    }

    /// Request `ISteamUserStats/GetNumberOfCurrentPlayers/v0001` to get the
    /// number of players currently in game.
    ///
    /// The payload is read from `response.player_count`; zero is a valid count.
    pub async fn get_number_of_current_players(
        &self,
        appid: u32,
        options: &RequestOptions,
    ) -> Result<u64, SteamError> {
        let endpoint = Endpoint::GetNumberOfCurrentPlayers;
        let params = ParameterSet {
            appid: Some(appid),
            ..Default::default()
        };

        let body = self.call(endpoint, params, options).await?;
        unwrap_nested(endpoint, body, "response", "player_count")
    }

    /// Request `IPlayerService/GetOwnedGames/v0001` to get the games owned by a
    /// player. Needs an API key.
    ///
    /// The payload is the whole `response` object.
    pub async fn get_owned_games(
        &self,
        steamid: &str,
        options: &OwnedGamesOptions,
    ) -> Result<OwnedGames, SteamError> {
        let endpoint = Endpoint::GetOwnedGames;
        let params = ParameterSet {
            steamid: Some(steamid.to_owned()),
            include_appinfo: options.include_appinfo,
            include_played_free_games: options.include_played_free_games,
            appids_filter: Some(options.appids_filter.clone()),
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_object(endpoint, body, "response")
    }

    /// Request `IPlayerService/GetRecentlyPlayedGames/v0001` to get the games a
    /// player played in the last two weeks. Needs an API key.
    ///
    /// The payload is the whole `response` object.
    pub async fn get_recently_played_games(
        &self,
        steamid: &str,
        options: &RecentlyPlayedGamesOptions,
    ) -> Result<RecentlyPlayedGames, SteamError> {
        let endpoint = Endpoint::GetRecentlyPlayedGames;
        let params = ParameterSet {
            steamid: Some(steamid.to_owned()),
            count: options.count,
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_object(endpoint, body, "response")
    }

    /// Request `ISteamUserStats/GetSchemaForGame/v0002` to get the stats and
    /// achievements a game declares. Needs an API key.
    ///
    /// The payload is the whole `game` object.
    pub async fn get_schema_for_game(
        &self,
        appid: u32,
        options: &LanguageOptions,
    ) -> Result<GameSchema, SteamError> {
        let endpoint = Endpoint::GetSchemaForGame;
        let params = ParameterSet {
            appid: Some(appid),
            lang: options.lang.clone(),
            ..Default::default()
        };

        let body = self.call(endpoint, params, &options.request).await?;
        unwrap_object(endpoint, body, "game")
    }

    /// Resolves the request of one call.
    ///
    /// For a protected endpoint the key is taken from `options`, then from the
    /// client configuration, and the call fails with
    /// [`SteamError::MissingApiKey`] before anything else when there is none.
    fn prepare(
        &self,
        endpoint: Endpoint,
        mut params: ParameterSet,
        options: &RequestOptions,
    ) -> Result<RequestDescriptor, SteamError> {
        if endpoint.needs_key() {
            let key = non_empty(&options.key)
                .or_else(|| non_empty(&self.config.api_key))
                .ok_or(SteamError::MissingApiKey)?;
            params.key = Some(key.to_owned());
        }

        let mut url = endpoint.url(&self.config.base_url)?;
        params.apply(&mut url);

        let transport_options = options
            .transport
            .clone()
            .unwrap_or_else(|| self.config.transport.clone());

        Ok(RequestDescriptor {
            url,
            options: transport_options,
        })
    }

    /// Performs one call and returns the JSON body of a successful response.
    async fn call(
        &self,
        endpoint: Endpoint,
        params: ParameterSet,
        options: &RequestOptions,
    ) -> Result<Value, SteamError> {
        info!("request {}", endpoint);

        let request = self.prepare(endpoint, params, options)?;
        let response = execute(&self.transport, &request).await?;

        debug!("response from {} -> status {}", endpoint, response.status);

        Ok(response.body)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
