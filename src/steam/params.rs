//! Query parameters of the endpoint calls.
//!
//! Callers describe optional parameters with the per-endpoint option structs
//! ([`NewsForAppOptions`], [`OwnedGamesOptions`], ...). The client merges them
//! with the required arguments into a [`ParameterSet`], which is serialized by
//! a single routine shared by every endpoint.
//!
//! Only truthy values are written: `None`, `0`, `false`, empty strings and
//! empty lists never reach the query string. This also drops an explicit
//! `Some(false)` such as `secure = false`, which the Steam Web API then treats
//! as unset.

use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::steam::requester::TransportOptions;

/// Filter of [`get_friend_list`](crate::steam::SteamClient::get_friend_list).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// Every relationship
    #[default]
    All,
    /// Only confirmed friends
    Friend,
}

impl Relationship {
    /// Wire value of the relationship.
    pub fn as_str(self) -> &'static str {
        match self {
            Relationship::All => "all",
            Relationship::Friend => "friend",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options every endpoint call accepts.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// API key overriding the client default for this call
    pub key: Option<String>,
    /// Transport options overriding the client default for this call
    pub transport: Option<TransportOptions>,
}

/// Optional parameters of `GetServersAtAddress`.
#[derive(Debug, Clone, Default)]
pub struct ServersAtAddressOptions {
    pub request: RequestOptions,
    pub gmsindex: Option<u32>,
    pub appid: Option<u32>,
    pub gamedir: Option<String>,
    pub region: Option<u32>,
    pub secure: Option<bool>,
    pub lan: Option<bool>,
    pub gameport: Option<u32>,
    pub specport: Option<u32>,
}

/// Optional parameters of `GetNewsForApp`.
#[derive(Debug, Clone, Default)]
pub struct NewsForAppOptions {
    pub request: RequestOptions,
    /// Number of news entries to return
    pub count: Option<u32>,
    /// Maximum length of each entry content
    pub maxlength: Option<u32>,
}

/// Optional parameters of the endpoints returning localized data
/// (`GetPlayerAchievements`, `GetUserStatsForGame`, `GetSchemaForGame`).
#[derive(Debug, Clone, Default)]
pub struct LanguageOptions {
    pub request: RequestOptions,
    /// Language of the returned texts, e.g. `english`
    pub lang: Option<String>,
}

/// Optional parameters of `GetOwnedGames`.
#[derive(Debug, Clone, Default)]
pub struct OwnedGamesOptions {
    pub request: RequestOptions,
    /// Include game name and icons
    pub include_appinfo: Option<bool>,
    /// Include free games the player has played
    pub include_played_free_games: Option<bool>,
    /// Only return these apps
    pub appids_filter: Vec<u32>,
}

/// Optional parameters of `GetRecentlyPlayedGames`.
#[derive(Debug, Clone, Default)]
pub struct RecentlyPlayedGamesOptions {
    pub request: RequestOptions,
    /// Number of games to return
    pub count: Option<u32>,
}

/// Value that can be written in the query string.
trait QueryValue {
    /// Returns the wire value, or `None` when the value is falsy.
    fn to_query(&self) -> Option<String>;
}

impl QueryValue for String {
    fn to_query(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_owned())
    }
}

impl QueryValue for u32 {
    fn to_query(&self) -> Option<String> {
        (*self != 0).then(|| self.to_string())
    }
}

impl QueryValue for bool {
    fn to_query(&self) -> Option<String> {
        (*self).then(|| "true".to_owned())
    }
}

impl QueryValue for Vec<String> {
    fn to_query(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.join(","))
    }
}

impl QueryValue for Relationship {
    fn to_query(&self) -> Option<String> {
        Some(self.as_str().to_owned())
    }
}

/// Every semantic parameter an endpoint call may send.
///
/// Built fresh for each call; fields an endpoint does not use stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParameterSet {
    pub key: Option<String>,
    pub addr: Option<String>,
    pub gmsindex: Option<u32>,
    pub appid: Option<u32>,
    pub gamedir: Option<String>,
    pub region: Option<u32>,
    pub secure: Option<bool>,
    pub lan: Option<bool>,
    pub gameport: Option<u32>,
    pub specport: Option<u32>,
    pub count: Option<u32>,
    pub maxlength: Option<u32>,
    pub gameid: Option<u32>,
    pub steamids: Option<Vec<String>>,
    pub steamid: Option<String>,
    pub relationship: Option<Relationship>,
    pub include_appinfo: Option<bool>,
    pub include_played_free_games: Option<bool>,
    pub appids_filter: Option<Vec<u32>>,
    pub lang: Option<String>,
}

impl ParameterSet {
    /// Returns the `(query key, value)` pairs to send, key first.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        push(&mut pairs, "key", &self.key);
        push(&mut pairs, "addr", &self.addr);
        push(&mut pairs, "gmsindex", &self.gmsindex);
        push(&mut pairs, "appid", &self.appid);
        push(&mut pairs, "gamedir", &self.gamedir);
        push(&mut pairs, "region", &self.region);
        push(&mut pairs, "secure", &self.secure);
        push(&mut pairs, "lan", &self.lan);
        push(&mut pairs, "gameport", &self.gameport);
        push(&mut pairs, "specport", &self.specport);
        push(&mut pairs, "count", &self.count);
        push(&mut pairs, "maxlength", &self.maxlength);
        push(&mut pairs, "gameid", &self.gameid);
        push(&mut pairs, "steamids", &self.steamids);
        push(&mut pairs, "steamid", &self.steamid);
        push(&mut pairs, "relationship", &self.relationship);
        push(&mut pairs, "include_appinfo", &self.include_appinfo);
        push(
            &mut pairs,
            "include_played_free_games",
            &self.include_played_free_games,
        );
        if let Some(input_json) = self.input_json() {
            pairs.push(("input_json", input_json));
        }
        push(&mut pairs, "l", &self.lang);

        pairs
    }

    /// Appends the query pairs to `url`.
    ///
    /// The url is left untouched when there is nothing to send, so it never
    /// ends with a bare `?`.
    pub fn apply(&self, url: &mut Url) {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }

    /// `appids_filter` is only honored through the `input_json` parameter,
    /// which must repeat the other parameters of the call.
    fn input_json(&self) -> Option<String> {
        let appids_filter = self.appids_filter.as_ref().filter(|ids| !ids.is_empty())?;

        let mut input = Map::new();
        if let Some(steamid) = self.steamid.as_ref().and_then(QueryValue::to_query) {
            input.insert("steamid".to_owned(), Value::from(steamid));
        }
        if self.include_appinfo.unwrap_or_default() {
            input.insert("include_appinfo".to_owned(), Value::Bool(true));
        }
        if self.include_played_free_games.unwrap_or_default() {
            input.insert("include_played_free_games".to_owned(), Value::Bool(true));
        }
        input.insert("appids_filter".to_owned(), Value::from(appids_filter.clone()));

        Some(Value::Object(input).to_string())
    }
}

fn push<T: QueryValue>(
    pairs: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: &Option<T>,
) {
    if let Some(value) = value.as_ref().and_then(QueryValue::to_query) {
        pairs.push((name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(params: &ParameterSet) -> String {
        let mut url: Url = "https://api.steampowered.com/ISteamApps/GetServersAtAddress/v0001"
            .parse()
            .unwrap();
        params.apply(&mut url);
        url.query().unwrap_or_default().to_owned()
    }

    #[test]
    fn test_empty_set_leaves_url_untouched() {
        let mut url: Url = "https://api.steampowered.com/ISteamApps/GetAppList/v0002"
            .parse()
            .unwrap();
        ParameterSet::default().apply(&mut url);
        assert_eq!(
            url.as_str(),
            "https://api.steampowered.com/ISteamApps/GetAppList/v0002"
        );
    }

    #[test]
    fn test_falsy_values_are_omitted() {
        let params = ParameterSet {
            addr: Some(String::new()),
            gmsindex: Some(0),
            appid: Some(0),
            gamedir: Some(String::new()),
            region: Some(0),
            secure: Some(false),
            lan: Some(false),
            gameport: Some(0),
            specport: Some(0),
            count: Some(0),
            maxlength: Some(0),
            steamids: Some(vec![]),
            include_appinfo: Some(false),
            include_played_free_games: Some(false),
            appids_filter: Some(vec![]),
            lang: Some(String::new()),
            ..Default::default()
        };
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn test_key_comes_first() {
        let params = ParameterSet {
            key: Some("secret".to_owned()),
            steamid: Some("76561197960435530".to_owned()),
            relationship: Some(Relationship::Friend),
            ..Default::default()
        };
        assert_eq!(
            query(&params),
            "key=secret&steamid=76561197960435530&relationship=friend"
        );
    }

    #[test]
    fn test_server_parameters() {
        let params = ParameterSet {
            addr: Some("127.0.0.1:27015".to_owned()),
            gmsindex: Some(2),
            appid: Some(440),
            gamedir: Some("tf".to_owned()),
            region: Some(255),
            secure: Some(true),
            lan: Some(true),
            gameport: Some(27015),
            specport: Some(27020),
            ..Default::default()
        };
        assert_eq!(
            query(&params),
            "addr=127.0.0.1%3A27015&gmsindex=2&appid=440&gamedir=tf&region=255&secure=true&lan=true&gameport=27015&specport=27020"
        );
    }

    #[test]
    fn test_steamids_are_comma_joined() {
        let params = ParameterSet {
            steamids: Some(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()]),
            ..Default::default()
        };
        assert_eq!(params.query_pairs(), vec![("steamids", "1,2,3".to_owned())]);
    }

    #[test]
    fn test_lang_uses_lowercase_l() {
        let params = ParameterSet {
            steamid: Some("1".to_owned()),
            appid: Some(440),
            lang: Some("french".to_owned()),
            ..Default::default()
        };
        assert_eq!(query(&params), "appid=440&steamid=1&l=french");
    }

    #[test]
    fn test_appids_filter_uses_input_json() {
        let params = ParameterSet {
            steamid: Some("1".to_owned()),
            include_appinfo: Some(true),
            include_played_free_games: Some(false),
            appids_filter: Some(vec![440, 570]),
            ..Default::default()
        };
        let pairs = params.query_pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("steamid", "1".to_owned()));
        assert_eq!(pairs[1], ("include_appinfo", "true".to_owned()));
        assert_eq!(pairs[2].0, "input_json");

        let input: Value = serde_json::from_str(&pairs[2].1).unwrap();
        assert_eq!(
            input,
            serde_json::json!({
                "steamid": "1",
                "include_appinfo": true,
                "appids_filter": [440, 570]
            })
        );
    }

    #[test]
    fn test_relationship_display() {
        assert_eq!(Relationship::All.to_string(), "all");
        assert_eq!(Relationship::default(), Relationship::All);
    }
}
