//! Chess.com public API client (archives + monthly games endpoints).

use crate::record::GameOutcome;

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::time::Duration;

pub const API_BASE: &str = "https://api.chess.com/pub";
const USER_AGENT: &str = "chess-analytics/0.3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug)]
struct ArchivesResponse {
    #[serde(default)]
    archives: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct MonthlyGamesResponse {
    // Kept as raw values so one malformed game skips, not the month.
    #[serde(default)]
    games: Vec<serde_json::Value>,
}

/// One finished game as returned by the monthly archive endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiGame {
    #[serde(default)]
    pub url: String,
    pub pgn: Option<String>,
    #[serde(default)]
    pub time_class: String,
    #[serde(default)]
    pub end_time: u64,
    pub white: PlayerSide,
    pub black: PlayerSide,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerSide {
    pub username: String,
    pub result: String,
}

impl ApiGame {
    fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value::<ApiGame>(value) {
            Ok(game) => Some(game),
            Err(e) => {
                warn!("Skipping malformed game entry: {e}");
                None
            }
        }
    }

    /// Trailing segment of the game URL, used in the stored filename.
    pub fn game_id(&self) -> &str {
        self.url
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .unwrap_or("unknown_id")
    }

    /// Outcome from the tracked player's side of the result codes, or
    /// `None` when neither side matches the handle.
    pub fn outcome_for(&self, username: &str) -> Option<GameOutcome> {
        let side = if self.white.username.eq_ignore_ascii_case(username) {
            &self.white
        } else if self.black.username.eq_ignore_ascii_case(username) {
            &self.black
        } else {
            warn!(
                "Neither side of game {} matches handle '{}', skipping",
                self.url, username
            );
            return None;
        };

        Some(GameOutcome::from_api_result(&side.result, &self.url))
    }
}

/// Blocking client for the public game archive. One instance per run.
pub struct ArchiveClient {
    http: reqwest::blocking::Client,
    base: String,
}

impl ArchiveClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base: API_BASE.to_string(),
        })
    }

    /// Monthly archive URLs for a player, oldest first.
    pub fn archives(&self, username: &str) -> Result<Vec<String>> {
        let url = format!("{}/player/{}/games/archives", self.base, username);
        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch archives for '{username}'"))?
            .error_for_status()
            .with_context(|| format!("Archive list request for '{username}' was rejected"))?;

        let parsed: ArchivesResponse = response
            .json()
            .context("Failed to decode archives response")?;
        Ok(parsed.archives)
    }

    /// Games in one monthly archive. Malformed entries are skipped with a
    /// warning; transport and decode failures are fatal.
    pub fn monthly_games(&self, archive_url: &str) -> Result<Vec<ApiGame>> {
        let response = self
            .http
            .get(archive_url)
            .send()
            .with_context(|| format!("Failed to fetch games from {archive_url}"))?
            .error_for_status()
            .with_context(|| format!("Archive request {archive_url} was rejected"))?;

        let parsed: MonthlyGamesResponse = response
            .json()
            .with_context(|| format!("Failed to decode games from {archive_url}"))?;

        Ok(parsed
            .games
            .into_iter()
            .filter_map(ApiGame::from_value)
            .collect())
    }
}
