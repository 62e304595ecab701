use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

const DEFAULT_PATCH: &str = "14.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentStyle {
    Aggressive,
    Scaling,
    SplitPush,
    Teamfight,
}

impl FromStr for OpponentStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "aggressive" => Ok(OpponentStyle::Aggressive),
            "scaling" => Ok(OpponentStyle::Scaling),
            "splitpush" => Ok(OpponentStyle::SplitPush),
            "teamfight" => Ok(OpponentStyle::Teamfight),
            other => Err(AppError::ConfigError(format!(
                "unknown opponent style '{}' (expected Aggressive, Scaling, Split Push or Teamfight)",
                other
            ))),
        }
    }
}

impl fmt::Display for OpponentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpponentStyle::Aggressive => "Aggressive",
            OpponentStyle::Scaling => "Scaling",
            OpponentStyle::SplitPush => "Split Push",
            OpponentStyle::Teamfight => "Teamfight",
        };
        write!(f, "{}", label)
    }
}

/// Per-call settings handed to both engines.
///
/// `opponent_style` is carried through but does not change any score yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub opponent_style: OpponentStyle,
    pub patch_version: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            opponent_style: OpponentStyle::Teamfight,
            patch_version: DEFAULT_PATCH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Option<String>,
    pub live_url: Option<String>,
    pub grid_api_key: Option<String>,
    pub catalog_path: Option<String>,
    pub simulation: SimulationConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let patch_version =
            env::var("RIFTMIND_PATCH").unwrap_or_else(|_| DEFAULT_PATCH.to_string());
        let opponent_style = match env::var("RIFTMIND_OPPONENT_STYLE") {
            Ok(raw) => raw.parse()?,
            Err(_) => OpponentStyle::Teamfight,
        };

        Ok(Config {
            backend_url: non_empty_var("RIFTMIND_BACKEND_URL"),
            live_url: non_empty_var("GRID_LIVE_URL"),
            grid_api_key: non_empty_var("GRID_API_KEY"),
            catalog_path: non_empty_var("RIFTMIND_CATALOG"),
            simulation: SimulationConfig {
                opponent_style,
                patch_version,
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
