use crate::catalog::{Catalog, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Win rate used for any champion the provider has no entry for.
pub const NEUTRAL_WIN_RATE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChampionStats {
    pub win_rate: f64,  // percent
    pub pick_rate: f64, // percent
    pub games_played: u32,
}

/// Source of per-champion numbers for a patch.
pub trait StatsProvider {
    fn get_stats(&self, ids: &[&str], patch_version: &str) -> HashMap<String, ChampionStats>;
}

/// Win-rate lookup over one provider response.
pub struct StatsView {
    stats: HashMap<String, ChampionStats>,
}

impl StatsView {
    pub fn fetch(provider: &dyn StatsProvider, ids: &[&str], patch_version: &str) -> Self {
        let stats = provider.get_stats(ids, patch_version);
        let games: u64 = stats.values().map(|s| u64::from(s.games_played)).sum();
        let top_pick_rate = stats.values().map(|s| s.pick_rate).fold(0.0, f64::max);
        debug!(
            patch = patch_version,
            requested = ids.len(),
            returned = stats.len(),
            games,
            top_pick_rate,
            "stats fetched"
        );
        StatsView { stats }
    }

    pub fn win_rate(&self, id: &str) -> f64 {
        self.stats
            .get(id)
            .map(|s| s.win_rate)
            .unwrap_or(NEUTRAL_WIN_RATE)
    }
}

/// Deterministic stand-in for the live stats feed, derived from the id alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockStatsProvider;

impl MockStatsProvider {
    pub fn stats_for(id: &str) -> ChampionStats {
        let seed = id.bytes().next().map(u32::from).unwrap_or(0) + id.len() as u32;
        ChampionStats {
            win_rate: 48.0 + (seed % 7) as f64,
            pick_rate: 5.0 + (seed % 20) as f64,
            games_played: 100 + seed * 10,
        }
    }
}

impl StatsProvider for MockStatsProvider {
    fn get_stats(&self, ids: &[&str], _patch_version: &str) -> HashMap<String, ChampionStats> {
        ids.iter()
            .map(|id| (id.to_string(), Self::stats_for(id)))
            .collect()
    }
}

/// Fixed numbers pinned in memory; ignores the patch version.
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    stats: HashMap<String, ChampionStats>,
}

#[allow(dead_code)]
impl StatsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_win_rate(mut self, id: &str, win_rate: f64) -> Self {
        self.insert(
            id,
            ChampionStats {
                win_rate,
                pick_rate: 0.0,
                games_played: 0,
            },
        );
        self
    }

    pub fn insert(&mut self, id: &str, stats: ChampionStats) {
        self.stats.insert(id.to_string(), stats);
    }
}

impl StatsProvider for StatsSnapshot {
    fn get_stats(&self, ids: &[&str], _patch_version: &str) -> HashMap<String, ChampionStats> {
        ids.iter()
            .filter_map(|id| self.stats.get(*id).map(|s| (id.to_string(), *s)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    D,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::D => "D",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchStats {
    pub champion_name: String,
    pub role: Option<Role>,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_rate: f64,
    pub tier: Tier,
}

impl Tier {
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate > 53.0 {
            Tier::S
        } else if win_rate > 51.0 {
            Tier::A
        } else if win_rate < 48.0 {
            Tier::D
        } else {
            Tier::B
        }
    }
}

/// Tier list for the patch overview, best win rate first.
pub fn patch_tier_list(catalog: &Catalog, _patch_version: &str) -> Vec<PatchStats> {
    let mut rows: Vec<PatchStats> = catalog
        .all()
        .iter()
        .map(|champ| {
            let seed = champ.id.bytes().next().map(u32::from).unwrap_or(0);
            let win_rate = 46.0 + (seed % 10) as f64;
            PatchStats {
                champion_name: champ.name.clone(),
                role: champ.roles.first().copied(),
                win_rate,
                pick_rate: 2.0 + (seed % 15) as f64,
                ban_rate: 1.0 + (seed % 30) as f64,
                tier: Tier::from_win_rate(win_rate),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}
