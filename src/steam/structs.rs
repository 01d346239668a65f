//! Records returned by the Steam Web API endpoints.
//!
//! These are plain `serde` structures decoded from the endpoint payloads once
//! the envelope has been removed. Fields the API omits for private profiles or
//! unset data are optional or defaulted.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// An application of the Steam catalog from `GetAppList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Application id
    pub appid: u32,
    /// Application name
    pub name: String,
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "appid={}, name={}", self.appid, self.name)
    }
}

/// A game server from `GetServersAtAddress`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    /// Address and port of the server
    pub addr: String,
    pub gmsindex: i32,
    /// Steam id of the server
    pub steamid: String,
    pub appid: u32,
    /// Game directory, e.g. `tf`
    pub gamedir: String,
    pub region: i32,
    pub secure: bool,
    pub lan: bool,
    pub gameport: u16,
    pub specport: u16,
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "addr={}, appid={}, gamedir={}, secure={}",
            self.addr, self.appid, self.gamedir, self.secure
        )
    }
}

/// A news entry from `GetNewsForApp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct News {
    pub gid: String,
    pub title: String,
    pub url: String,
    pub is_external_url: bool,
    pub author: String,
    pub contents: String,
    pub feedlabel: String,
    /// Publication date as a unix timestamp
    pub date: u64,
    pub feedname: String,
    pub feed_type: u32,
    pub appid: u32,
}

/// Global unlock rate of an achievement from `GetGlobalAchievementPercentagesForApp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// API name of the achievement
    pub name: String,
    /// Percentage of players who unlocked it
    ///
    /// The API sends it either as a number or as a string.
    #[serde(deserialize_with = "number_or_string")]
    pub percent: f64,
}

/// A player profile from `GetPlayerSummaries`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    /// 64 bit Steam id
    pub steamid: String,
    /// 1 private, 3 public
    pub communityvisibilitystate: u8,
    pub profilestate: Option<u8>,
    /// Display name
    pub personaname: String,
    pub profileurl: String,
    pub avatar: String,
    pub avatarmedium: String,
    pub avatarfull: String,
    pub avatarhash: String,
    pub lastlogoff: Option<u64>,
    /// 0 offline, 1 online, 2 busy, 3 away, 4 snooze, 5 looking to trade, 6 looking to play
    pub personastate: u8,
    pub realname: Option<String>,
    pub primaryclanid: Option<String>,
    pub timecreated: Option<u64>,
    pub personastateflags: Option<u32>,
    pub loccountrycode: Option<String>,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "steamid={}, personaname={}, personastate={}",
            self.steamid, self.personaname, self.personastate
        )
    }
}

/// A friend entry from `GetFriendList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub steamid: String,
    pub relationship: String,
    /// Unix timestamp of the friendship start
    pub friend_since: u64,
}

impl fmt::Display for Friend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "steamid={}, relationship={}, friend_since={}",
            self.steamid, self.relationship, self.friend_since
        )
    }
}

/// Achievement state of a player from `GetPlayerAchievements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAchievement {
    pub apiname: String,
    /// 1 when unlocked
    pub achieved: u8,
    #[serde(default)]
    pub unlocktime: u64,
    /// Localized name, only sent when a language is requested
    #[serde(default)]
    pub name: Option<String>,
    /// Localized description, only sent when a language is requested
    #[serde(default)]
    pub description: Option<String>,
}

/// A game statistic of a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: f64,
}

/// An achievement as listed in `GetUserStatsForGame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAchievement {
    pub name: String,
    pub achieved: u8,
}

/// Statistics of a player for one game from `GetUserStatsForGame`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    #[serde(rename = "steamID")]
    pub steam_id: String,
    #[serde(rename = "gameName")]
    pub game_name: String,
    pub stats: Vec<Stat>,
    pub achievements: Vec<StatAchievement>,
}

/// A game owned by a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnedGame {
    pub appid: u32,
    /// Only sent with `include_appinfo`
    pub name: Option<String>,
    /// Only sent with `include_appinfo`
    pub img_icon_url: Option<String>,
    /// Minutes played in the last two weeks
    pub playtime_2weeks: Option<u64>,
    /// Total minutes played
    pub playtime_forever: u64,
    pub playtime_windows_forever: u64,
    pub playtime_mac_forever: u64,
    pub playtime_linux_forever: u64,
    pub rtime_last_played: Option<u64>,
}

/// Games owned by a player from `GetOwnedGames`.
///
/// The API answers with an empty object for private profiles, which decodes
/// into zero games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnedGames {
    pub game_count: u32,
    pub games: Vec<OwnedGame>,
}

/// A game recently played by a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentlyPlayedGame {
    pub appid: u32,
    pub name: String,
    /// Minutes played in the last two weeks
    pub playtime_2weeks: u64,
    /// Total minutes played
    pub playtime_forever: u64,
    pub img_icon_url: String,
    pub playtime_windows_forever: u64,
    pub playtime_mac_forever: u64,
    pub playtime_linux_forever: u64,
}

/// Games recently played by a player from `GetRecentlyPlayedGames`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentlyPlayedGames {
    pub total_count: u32,
    pub games: Vec<RecentlyPlayedGame>,
}

/// Stats and achievements defined by a game from `GetSchemaForGame`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSchema {
    #[serde(rename = "gameName")]
    pub game_name: String,
    #[serde(rename = "gameVersion")]
    pub game_version: String,
    #[serde(rename = "availableGameStats")]
    pub available_game_stats: AvailableGameStats,
}

/// Stats and achievements part of a [`GameSchema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableGameStats {
    pub stats: Vec<SchemaStat>,
    pub achievements: Vec<SchemaAchievement>,
}

/// A statistic declared in a [`GameSchema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaStat {
    pub name: String,
    pub defaultvalue: f64,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// An achievement declared in a [`GameSchema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaAchievement {
    pub name: String,
    pub defaultvalue: f64,
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// 1 when hidden until unlocked
    pub hidden: u8,
    pub description: Option<String>,
    pub icon: String,
    pub icongray: String,
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::String(text) => text.parse().map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_display() {
        let app = App {
            appid: 440,
            name: "Team Fortress 2".to_string(),
        };
        assert_eq!(format!("{}", app), "appid=440, name=Team Fortress 2");
    }

    #[test]
    fn test_friend_display() {
        let friend = Friend {
            steamid: "76561197960265731".to_string(),
            relationship: "friend".to_string(),
            friend_since: 0,
        };
        assert_eq!(
            format!("{}", friend),
            "steamid=76561197960265731, relationship=friend, friend_since=0"
        );
    }

    #[test]
    fn test_achievement_percent_as_number_or_string() {
        let json = r#"[
            {"name": "TF_PLAY_GAME_EVERYCLASS", "percent": 54.2},
            {"name": "TF_GET_HEALPOINTS", "percent": "12.5"}
        ]"#;

        let achievements: Vec<Achievement> = serde_json::from_str(json).unwrap();
        assert_eq!(achievements[0].percent, 54.2);
        assert_eq!(achievements[1].percent, 12.5);
    }

    #[test]
    fn test_achievement_percent_invalid_string() {
        let json = r#"{"name": "TF_GET_HEALPOINTS", "percent": "lots"}"#;
        assert!(serde_json::from_str::<Achievement>(json).is_err());
    }

    #[test]
    fn test_private_player_profile() {
        let json = r#"{
            "steamid": "76561197960435530",
            "communityvisibilitystate": 1,
            "personaname": "Robin",
            "profileurl": "https://steamcommunity.com/id/robinwalker/",
            "avatar": "a.jpg",
            "avatarmedium": "a_medium.jpg",
            "avatarfull": "a_full.jpg",
            "avatarhash": "f1dd",
            "personastate": 0
        }"#;

        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.personaname, "Robin");
        assert_eq!(player.realname, None);
        assert_eq!(player.loccountrycode, None);
        assert_eq!(
            format!("{}", player),
            "steamid=76561197960435530, personaname=Robin, personastate=0"
        );
    }

    #[test]
    fn test_player_stats_field_names() {
        let json = r#"{
            "steamID": "76561197960435530",
            "gameName": "Team Fortress 2",
            "stats": [{"name": "Scout.accum.iPointsScored", "value": 1234}],
            "achievements": [{"name": "TF_PLAY_GAME_EVERYCLASS", "achieved": 1}]
        }"#;

        let stats: PlayerStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.steam_id, "76561197960435530");
        assert_eq!(stats.game_name, "Team Fortress 2");
        assert_eq!(stats.stats[0].value, 1234.0);
        assert_eq!(stats.achievements[0].achieved, 1);
    }

    #[test]
    fn test_owned_games_private_profile() {
        let owned: OwnedGames = serde_json::from_str("{}").unwrap();
        assert_eq!(owned, OwnedGames::default());
    }

    #[test]
    fn test_game_schema() {
        let json = r#"{
            "gameName": "Team Fortress 2",
            "gameVersion": "125",
            "availableGameStats": {
                "achievements": [{
                    "name": "TF_PLAY_GAME_EVERYCLASS",
                    "defaultvalue": 0,
                    "displayName": "Head of the Class",
                    "hidden": 0,
                    "description": "Play a complete round with every class.",
                    "icon": "icon.jpg",
                    "icongray": "icongray.jpg"
                }]
            }
        }"#;

        let schema: GameSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.game_version, "125");
        assert!(schema.available_game_stats.stats.is_empty());
        assert_eq!(
            schema.available_game_stats.achievements[0].display_name,
            "Head of the Class"
        );
    }
}
