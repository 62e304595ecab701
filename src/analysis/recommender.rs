use super::stats::{StatsProvider, StatsView};
use crate::catalog::{Catalog, Champion};
use crate::config::SimulationConfig;
use crate::draft::{DraftSlot, DraftState, SlotKind};
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

const MAX_RECOMMENDATIONS: usize = 3;
const MAX_SCORE: f64 = 99.0;

const COUNTER_BONUS: f64 = 25.0;
const COUNTERED_PENALTY: f64 = 30.0;
const ENGAGE_FOLLOW_UP_BONUS: f64 = 5.0;
const TEAMFIGHT_BONUS: f64 = 3.0;

const DIRECT_COUNTER_BASE: u32 = 90;
const DIRECT_COUNTER_JITTER: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    #[allow(dead_code)] // synergy bonuses never relabel a recommendation
    Synergy,
    Counter,
    Comfort,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationKind::Synergy => write!(f, "synergy"),
            RecommendationKind::Counter => write!(f, "counter"),
            RecommendationKind::Comfort => write!(f, "comfort"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub champion_name: String,
    pub score: u32,
    pub reasoning: String,
    pub kind: RecommendationKind,
}

impl Recommendation {
    pub fn new(
        champion_name: String,
        score: u32,
        reasoning: String,
        kind: RecommendationKind,
    ) -> Self {
        Recommendation {
            champion_name,
            score,
            reasoning,
            kind,
        }
    }
}

pub struct Recommender<'a> {
    catalog: &'a Catalog,
    stats: &'a dyn StatsProvider,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog, stats: &'a dyn StatsProvider) -> Self {
        Recommender { catalog, stats }
    }

    /// Up to three suggestions for the slot being edited, best first.
    ///
    /// With no active slot this is the global meta list. A filled active slot asks
    /// for direct counters to the champion in it. An empty active slot is scored
    /// against both teams' picks.
    pub fn recommend<R: Rng>(
        &self,
        draft: &DraftState,
        active: Option<&DraftSlot>,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Vec<Recommendation> {
        let available = self.available(draft);
        let stats = self.stats_for(&available, config);

        let recommendations = match active {
            None => global_meta(&available, &stats),
            Some(slot) => match &slot.champion {
                Some(target) => counters_to(target, &available, &stats, rng),
                None => contextual(draft, slot, &available, &stats),
            },
        };

        debug!(
            candidates = available.len(),
            returned = recommendations.len(),
            "recommendations computed"
        );
        recommendations
    }

    /// Best available win rates, ignoring the draft context. Never random.
    pub fn meta_picks(&self, draft: &DraftState, config: &SimulationConfig) -> Vec<Recommendation> {
        let available = self.available(draft);
        let stats = self.stats_for(&available, config);
        global_meta(&available, &stats)
    }

    fn available(&self, draft: &DraftState) -> Vec<&'a Champion> {
        let used = draft.used_ids();
        self.catalog
            .all()
            .iter()
            .filter(|c| !used.contains(c.id.as_str()))
            .collect()
    }

    fn stats_for(&self, available: &[&Champion], config: &SimulationConfig) -> StatsView {
        let ids: Vec<&str> = available.iter().map(|c| c.id.as_str()).collect();
        StatsView::fetch(self.stats, &ids, &config.patch_version)
    }
}

fn global_meta(available: &[&Champion], stats: &StatsView) -> Vec<Recommendation> {
    meta_ranking(available, stats, |_, wr| {
        format!("Highest available win rate ({:.0}%) in current patch.", wr)
    })
}

fn by_win_rate<'c>(available: &[&'c Champion], stats: &StatsView) -> Vec<&'c Champion> {
    let mut sorted = available.to_vec();
    sorted.sort_by(|a, b| {
        stats
            .win_rate(&b.id)
            .partial_cmp(&stats.win_rate(&a.id))
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

fn meta_ranking<F>(available: &[&Champion], stats: &StatsView, reason: F) -> Vec<Recommendation>
where
    F: Fn(&Champion, f64) -> String,
{
    by_win_rate(available, stats)
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|c| {
            let wr = stats.win_rate(&c.id);
            Recommendation::new(
                c.name.clone(),
                clamp_score(wr),
                reason(c, wr),
                RecommendationKind::Comfort,
            )
        })
        .collect()
}

fn counters_to<R: Rng>(
    target: &Champion,
    available: &[&Champion],
    stats: &StatsView,
    rng: &mut R,
) -> Vec<Recommendation> {
    let direct: Vec<&Champion> = available
        .iter()
        .copied()
        .filter(|c| c.counters_champion(target))
        .collect();

    if direct.is_empty() {
        return meta_ranking(available, stats, |c, _| {
            format!(
                "No direct counter found for {}, but {} is a strong meta pick.",
                target.name, c.name
            )
        });
    }

    by_win_rate(&direct, stats)
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|c| {
            let score = DIRECT_COUNTER_BASE + rng.gen_range(0..=DIRECT_COUNTER_JITTER);
            Recommendation::new(
                c.name.clone(),
                score,
                format!("Direct counter to {} based on matchup data.", target.name),
                RecommendationKind::Counter,
            )
        })
        .collect()
}

fn contextual(
    draft: &DraftState,
    slot: &DraftSlot,
    available: &[&Champion],
    stats: &StatsView,
) -> Vec<Recommendation> {
    let enemy_picks = draft.picks(slot.team.opponent());
    let my_picks = draft.picks(slot.team);

    let team_has = |tag: &str| my_picks.iter().any(|p| p.has_tag(tag));
    let engage = team_has("Engage");
    let teamfight = team_has("Teamfight");

    let mut scored: Vec<(f64, Recommendation)> = available
        .iter()
        .map(|champ| {
            let wr = stats.win_rate(&champ.id);
            let mut score = wr;
            let mut kind = RecommendationKind::Comfort;
            let mut reasoning = None;

            let countered: Vec<&str> = enemy_picks
                .iter()
                .filter(|enemy| champ.counters_champion(enemy))
                .map(|enemy| enemy.name.as_str())
                .collect();
            if !countered.is_empty() {
                score += COUNTER_BONUS * countered.len() as f64;
                kind = RecommendationKind::Counter;
                reasoning = Some(format!("Hard counter to {}.", countered.join(", ")));
            }

            // flat, not per counterer
            if enemy_picks.iter().any(|enemy| enemy.counters_champion(champ)) {
                score -= COUNTERED_PENALTY;
            }

            // synergy moves the score only; the kind stays as set above
            if slot.kind == SlotKind::Pick {
                if engage && champ.has_tag("FollowUp") {
                    score += ENGAGE_FOLLOW_UP_BONUS;
                }
                if teamfight && champ.has_tag("Teamfight") {
                    score += TEAMFIGHT_BONUS;
                }
            }

            let reasoning =
                reasoning.unwrap_or_else(|| format!("Solid pick ({:.0}% WR).", wr));
            (
                score,
                Recommendation::new(champ.name.clone(), clamp_score(score), reasoning, kind),
            )
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored.into_iter().map(|(_, rec)| rec).collect()
}

fn clamp_score(score: f64) -> u32 {
    score.round().clamp(0.0, MAX_SCORE) as u32
}
