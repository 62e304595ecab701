use crate::draft::Team;
use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "rift_mind/0.1.0";

#[derive(Debug, Clone, PartialEq)]
pub struct LiveGameResult {
    pub active: bool,
    pub winner: Option<Team>,
    pub game_id: Option<String>,
}

impl LiveGameResult {
    pub fn in_progress() -> Self {
        LiveGameResult {
            active: true,
            winner: None,
            game_id: None,
        }
    }

    /// Winner of a game that has finished, if the feed reported one.
    pub fn finished_winner(&self) -> Option<Team> {
        if self.active {
            None
        } else {
            self.winner
        }
    }
}

/// Where the current game's state comes from.
pub trait LiveGameFeed {
    fn check_status(&self) -> Result<LiveGameResult, AppError>;
}

/// Used when no live endpoint is configured; the game never ends.
pub struct OfflineFeed;

impl LiveGameFeed for OfflineFeed {
    fn check_status(&self) -> Result<LiveGameResult, AppError> {
        Ok(LiveGameResult::in_progress())
    }
}

pub struct HttpLiveFeed {
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct MatchStateDto {
    status: String,
    #[serde(default)]
    winner: Option<Team>,
    #[serde(default, rename = "gameId")]
    game_id: Option<String>,
}

impl HttpLiveFeed {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        HttpLiveFeed {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

impl LiveGameFeed for HttpLiveFeed {
    fn check_status(&self) -> Result<LiveGameResult, AppError> {
        let url = format!("{}/match-state", self.base_url);
        let body = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .set("x-api-key", &self.api_key)
            .timeout(Duration::from_secs(5))
            .call()
            .map_err(|e| AppError::HttpError(e.to_string()))?
            .into_string()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        parse_match_state(&body)
    }
}

fn parse_match_state(body: &str) -> Result<LiveGameResult, AppError> {
    let state: MatchStateDto =
        serde_json::from_str(body).map_err(|e| AppError::JsonError(e.to_string()))?;

    Ok(LiveGameResult {
        active: state.status != "completed",
        winner: state.winner,
        game_id: state.game_id,
    })
}
