//! steam-webapi - Command line front end of the Steam Web API client.
//!
//! Runs one endpoint of the Steam Web API and prints the decoded result as
//! pretty JSON on stdout. Logs go to stderr.
//!
//! # Configuration
//!
//! An optional YAML file holds the default API key and transport settings:
//!
//! ```yaml
//! api_key: "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
//! timeout: 30
//! ```
//!
//! Any value can be overridden with a `STEAM_WEBAPI_` environment variable,
//! e.g. `STEAM_WEBAPI_API_KEY`, and the key with `--key`.
//!
//! # Usage
//!
//! ```bash
//! steam-webapi current-players 440
//! steam-webapi --config config.yaml friends 76561197960435530 --relationship friend
//! RUST_LOG=debug steam-webapi --key XXXX owned-games 76561197960435530 --include-appinfo
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use serde::Serialize;
use serde_json::Value;

use steam_webapi::config::Config;
use steam_webapi::steam::{
    LanguageOptions, NewsForAppOptions, OwnedGamesOptions, RecentlyPlayedGamesOptions,
    Relationship, RequestOptions, ServersAtAddressOptions, SteamClient,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// API key, overrides the configured one.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Endpoint to run.
#[derive(Subcommand, Debug)]
enum Command {
    /// List every application of the catalog
    AppList,
    /// List the game servers running at an address
    ServersAtAddress {
        /// IP address, optionally with a port
        addr: String,
        #[arg(long)]
        appid: Option<u32>,
        #[arg(long)]
        gamedir: Option<String>,
        #[arg(long)]
        gmsindex: Option<u32>,
        #[arg(long)]
        region: Option<u32>,
        #[arg(long)]
        secure: bool,
        #[arg(long)]
        lan: bool,
        #[arg(long)]
        gameport: Option<u32>,
        #[arg(long)]
        specport: Option<u32>,
    },
    /// Latest news of an app
    News {
        appid: u32,
        /// Number of entries
        #[arg(long)]
        count: Option<u32>,
        /// Maximum length of each entry
        #[arg(long)]
        maxlength: Option<u32>,
    },
    /// Global unlock rates of the achievements of a game
    AchievementPercentages { gameid: u32 },
    /// Profile of one player
    Player { steamid: String },
    /// Profiles of several players
    Players {
        #[arg(required = true)]
        steamids: Vec<String>,
    },
    /// Friends of a player
    Friends {
        steamid: String,
        #[arg(long, value_enum, default_value_t = RelationshipArg::All)]
        relationship: RelationshipArg,
    },
    /// Achievements of a player for a game
    PlayerAchievements {
        steamid: String,
        appid: u32,
        /// Language of the achievement names
        #[arg(long)]
        lang: Option<String>,
    },
    /// Stats of a player for a game
    UserStats {
        steamid: String,
        appid: u32,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Number of players currently in game
    CurrentPlayers { appid: u32 },
    /// Games owned by a player
    OwnedGames {
        steamid: String,
        #[arg(long)]
        include_appinfo: bool,
        #[arg(long)]
        include_played_free_games: bool,
        /// Only return these apps
        #[arg(long, value_delimiter = ',')]
        appids_filter: Vec<u32>,
    },
    /// Games played in the last two weeks
    RecentlyPlayed {
        steamid: String,
        #[arg(long)]
        count: Option<u32>,
    },
    /// Stats and achievements declared by a game
    Schema {
        appid: u32,
        #[arg(long)]
        lang: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RelationshipArg {
    All,
    Friend,
}

impl From<RelationshipArg> for Relationship {
    fn from(arg: RelationshipArg) -> Self {
        match arg {
            RelationshipArg::All => Relationship::All,
            RelationshipArg::Friend => Relationship::Friend,
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, anyhow::Error> {
    serde_json::to_value(value).context("failed to serialize the result")
}

/// Runs `command` against `client` and returns its result as JSON.
async fn run(client: &SteamClient, command: Command) -> Result<Value, anyhow::Error> {
    let request = RequestOptions::default();

    match command {
        Command::AppList => to_json(client.get_app_list(&request).await?),
        Command::ServersAtAddress {
            addr,
            appid,
            gamedir,
            gmsindex,
            region,
            secure,
            lan,
            gameport,
            specport,
        } => {
            let options = ServersAtAddressOptions {
                request,
                gmsindex,
                appid,
                gamedir,
                region,
                secure: secure.then_some(true),
                lan: lan.then_some(true),
                gameport,
                specport,
            };
            to_json(client.get_servers_at_address(&addr, &options).await?)
        }
        Command::News {
            appid,
            count,
            maxlength,
        } => {
            let options = NewsForAppOptions {
                request,
                count,
                maxlength,
            };
            to_json(client.get_news_for_app(appid, &options).await?)
        }
        Command::AchievementPercentages { gameid } => to_json(
            client
                .get_global_achievement_percentages_for_app(gameid, &request)
                .await?,
        ),
        Command::Player { steamid } => {
            to_json(client.get_player_summary(&steamid, &request).await?)
        }
        Command::Players { steamids } => {
            to_json(client.get_player_summaries(steamids.as_slice(), &request).await?)
        }
        Command::Friends {
            steamid,
            relationship,
        } => to_json(
            client
                .get_friend_list(&steamid, relationship.into(), &request)
                .await?,
        ),
        Command::PlayerAchievements {
            steamid,
            appid,
            lang,
        } => {
            let options = LanguageOptions { request, lang };
            to_json(
                client
                    .get_player_achievements(&steamid, appid, &options)
                    .await?,
            )
        }
        Command::UserStats {
            steamid,
            appid,
            lang,
        } => {
            let options = LanguageOptions { request, lang };
            to_json(
                client
                    .get_user_stats_for_game(&steamid, appid, &options)
                    .await?,
            )
        }
        Command::CurrentPlayers { appid } => {
            to_json(client.get_number_of_current_players(appid, &request).await?)
        }
        Command::OwnedGames {
            steamid,
            include_appinfo,
            include_played_free_games,
            appids_filter,
        } => {
            let options = OwnedGamesOptions {
                request,
                include_appinfo: include_appinfo.then_some(true),
                include_played_free_games: include_played_free_games.then_some(true),
                appids_filter,
            };
            to_json(client.get_owned_games(&steamid, &options).await?)
        }
        Command::RecentlyPlayed { steamid, count } => {
            let options = RecentlyPlayedGamesOptions { request, count };
            to_json(client.get_recently_played_games(&steamid, &options).await?)
        }
        Command::Schema { appid, lang } => {
            let options = LanguageOptions { request, lang };
            to_json(client.get_schema_for_game(appid, &options).await?)
        }
    }
}

/// Main entry point.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: parses command-line arguments using `clap`
/// 3. **Configuration Loading**: reads the YAML file and the environment
/// 4. **Execution**: runs the endpoint and prints the result
#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut client_config = config.client_config();
    if args.key.is_some() {
        client_config.api_key = args.key;
    }
    info!("using steam web api at {}", client_config.base_url);

    let client = SteamClient::with_config(client_config);

    let output = run(&client, args.command)
        .await
        .and_then(|value| serde_json::to_string_pretty(&value).map_err(anyhow::Error::from));

    match output {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
