use super::stats::{StatsProvider, StatsView};
use crate::catalog::Champion;
use crate::config::SimulationConfig;
use crate::draft::{DraftState, Team};
use serde::Serialize;
use tracing::debug;

const COUNTER_WEIGHT: f64 = 4.0;
const MIN_PROBABILITY: f64 = 10.0;
const MAX_PROBABILITY: f64 = 90.0;
const MAX_THREATS: usize = 3;

pub const INSIGHT_BLUE_EDGE: &str =
    "Blue team has secured multiple hard counters, giving them a significant edge.";
pub const INSIGHT_RED_EDGE: &str = "Red team has effectively countered Blue's composition.";
pub const INSIGHT_SKILL: &str = "Matchups are skill-dependent with no hard counters yet.";
pub const INSIGHT_EVEN: &str = "Draft is even.";

pub const COUNTER_PICK_NOTE: &str = "(Counter Pick!)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftAnalysis {
    pub blue_win_probability: i32,
    pub strategic_insight: String,
    pub opponent_threats: Vec<String>,
}

pub struct ScoringEngine<'a> {
    stats: &'a dyn StatsProvider,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(stats: &'a dyn StatsProvider) -> Self {
        ScoringEngine { stats }
    }

    /// Heuristic read of the current draft from blue's side.
    ///
    /// Each pick adds `win_rate - 50` for its team, every counter relation between
    /// opposing picks moves the result by 4 points, and the total is clamped to
    /// 10..=90 so the estimate never claims a sure thing.
    pub fn analyze(&self, draft: &DraftState, config: &SimulationConfig) -> DraftAnalysis {
        let blue_picks = draft.picks(Team::Blue);
        let red_picks = draft.picks(Team::Red);

        let ids: Vec<&str> = blue_picks
            .iter()
            .chain(red_picks.iter())
            .map(|c| c.id.as_str())
            .collect();
        let stats = StatsView::fetch(self.stats, &ids, &config.patch_version);

        let blue_score = base_score(&blue_picks, &stats);
        let red_score = base_score(&red_picks, &stats);
        let counter_delta = counter_delta(&blue_picks, &red_picks);

        let raw = 50.0 + (blue_score - red_score) + counter_delta;
        let blue_win_probability = raw.clamp(MIN_PROBABILITY, MAX_PROBABILITY).round() as i32;

        let strategic_insight = if counter_delta > 5.0 {
            INSIGHT_BLUE_EDGE
        } else if counter_delta < -5.0 {
            INSIGHT_RED_EDGE
        } else if !blue_picks.is_empty() {
            INSIGHT_SKILL
        } else {
            INSIGHT_EVEN
        };

        let opponent_threats = threats(&blue_picks, &red_picks, &stats);

        debug!(
            blue_score,
            red_score,
            counter_delta,
            blue_win_probability,
            opponent_style = %config.opponent_style,
            "draft analysed"
        );

        DraftAnalysis {
            blue_win_probability,
            strategic_insight: strategic_insight.to_string(),
            opponent_threats,
        }
    }
}

fn base_score(picks: &[&Champion], stats: &StatsView) -> f64 {
    picks.iter().map(|c| stats.win_rate(&c.id) - 50.0).sum()
}

fn counter_delta(blue_picks: &[&Champion], red_picks: &[&Champion]) -> f64 {
    let mut delta = 0.0;
    for blue in blue_picks {
        for red in red_picks {
            if blue.counters_champion(red) {
                delta += COUNTER_WEIGHT;
            }
            if red.counters_champion(blue) {
                delta -= COUNTER_WEIGHT;
            }
        }
    }
    delta
}

fn threats(blue_picks: &[&Champion], red_picks: &[&Champion], stats: &StatsView) -> Vec<String> {
    red_picks
        .iter()
        .filter_map(|red| {
            let counters_blue = blue_picks.iter().any(|blue| red.counters_champion(blue));
            let mut threat_score = 0;
            if counters_blue {
                threat_score += 10;
            }
            if stats.win_rate(&red.id) > 52.0 {
                threat_score += 5;
            }

            if threat_score > 5 {
                Some(if counters_blue {
                    format!("{} {}", red.name, COUNTER_PICK_NOTE)
                } else {
                    red.name.clone()
                })
            } else {
                None
            }
        })
        .take(MAX_THREATS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::{MockStatsProvider, StatsSnapshot};
    use crate::catalog::{Catalog, Champion, Role};
    use crate::draft::SlotKind;

    fn champ(id: &str, counters: &[&str]) -> Champion {
        Champion {
            id: id.to_string(),
            name: format!("{} Name", id),
            roles: vec![Role::Mid],
            tags: Vec::new(),
            counters: counters.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn place(draft: &mut DraftState, team: Team, champion: Champion) {
        let slot = draft
            .slots
            .iter_mut()
            .find(|s| s.team == team && s.kind == SlotKind::Pick && s.champion.is_none())
            .expect("free pick slot");
        slot.champion = Some(champion);
    }

    fn flat_stats(ids: &[&str], win_rate: f64) -> StatsSnapshot {
        ids.iter()
            .fold(StatsSnapshot::new(), |s, id| s.with_win_rate(id, win_rate))
    }

    #[test]
    fn empty_draft_is_even() {
        let stats = MockStatsProvider;
        let result = ScoringEngine::new(&stats).analyze(&DraftState::standard(), &SimulationConfig::default());
        assert_eq!(result.blue_win_probability, 50);
        assert_eq!(result.strategic_insight, INSIGHT_EVEN);
        assert!(result.opponent_threats.is_empty());
    }

    #[test]
    fn single_counter_gives_blue_four_points() {
        let stats = flat_stats(&["A", "B", "C"], 50.0);
        let mut draft = DraftState::standard();
        place(&mut draft, Team::Blue, champ("A", &["B"]));
        place(&mut draft, Team::Red, champ("B", &[]));

        let result = ScoringEngine::new(&stats).analyze(&draft, &SimulationConfig::default());
        assert_eq!(result.blue_win_probability, 54);
        assert_eq!(result.strategic_insight, INSIGHT_SKILL);
    }

    #[test]
    fn swapping_sides_inverts_the_counter() {
        let stats = flat_stats(&["X", "Y"], 50.0);

        let mut blue_counters = DraftState::standard();
        place(&mut blue_counters, Team::Blue, champ("X", &["Y"]));
        place(&mut blue_counters, Team::Red, champ("Y", &[]));

        let mut red_counters = DraftState::standard();
        place(&mut red_counters, Team::Blue, champ("Y", &[]));
        place(&mut red_counters, Team::Red, champ("X", &["Y"]));

        let engine = ScoringEngine::new(&stats);
        let config = SimulationConfig::default();
        let blue = engine.analyze(&blue_counters, &config);
        let red = engine.analyze(&red_counters, &config);

        assert!(blue.blue_win_probability > 50);
        assert!(red.blue_win_probability < 50);
        assert_eq!(red.opponent_threats, vec!["X Name (Counter Pick!)".to_string()]);
    }

    #[test]
    fn strong_blue_picks_clamp_at_ninety() {
        let stats = flat_stats(&["A", "B", "C"], 70.0);
        let mut draft = DraftState::standard();
        for id in ["A", "B", "C"] {
            place(&mut draft, Team::Blue, champ(id, &[]));
        }

        let result = ScoringEngine::new(&stats).analyze(&draft, &SimulationConfig::default());
        assert_eq!(result.blue_win_probability, 90);
    }

    #[test]
    fn strong_red_picks_clamp_at_ten() {
        let stats = flat_stats(&["A", "B", "C"], 75.0);
        let mut draft = DraftState::standard();
        for id in ["A", "B", "C"] {
            place(&mut draft, Team::Red, champ(id, &[]));
        }

        let result = ScoringEngine::new(&stats).analyze(&draft, &SimulationConfig::default());
        assert_eq!(result.blue_win_probability, 10);
        // no blue picks yet
        assert_eq!(result.strategic_insight, INSIGHT_EVEN);
    }

    #[test]
    fn multiple_counters_flip_insight() {
        let stats = flat_stats(&["A", "B", "C", "D"], 50.0);

        let mut draft = DraftState::standard();
        place(&mut draft, Team::Blue, champ("A", &["C", "D"]));
        place(&mut draft, Team::Blue, champ("B", &[]));
        place(&mut draft, Team::Red, champ("C", &[]));
        place(&mut draft, Team::Red, champ("D", &[]));
        let result = ScoringEngine::new(&stats).analyze(&draft, &SimulationConfig::default());
        assert_eq!(result.blue_win_probability, 58);
        assert_eq!(result.strategic_insight, INSIGHT_BLUE_EDGE);

        let mut draft = DraftState::standard();
        place(&mut draft, Team::Blue, champ("A", &[]));
        place(&mut draft, Team::Blue, champ("B", &[]));
        place(&mut draft, Team::Red, champ("C", &["A", "B"]));
        let result = ScoringEngine::new(&stats).analyze(&draft, &SimulationConfig::default());
        assert_eq!(result.blue_win_probability, 42);
        assert_eq!(result.strategic_insight, INSIGHT_RED_EDGE);
    }

    #[test]
    fn threats_require_a_counter_and_keep_slot_order() {
        let stats = StatsSnapshot::new()
            .with_win_rate("B1", 50.0)
            .with_win_rate("R1", 54.0) // high win rate alone scores 5
            .with_win_rate("R2", 50.0)
            .with_win_rate("R3", 53.0)
            .with_win_rate("R4", 50.0)
            .with_win_rate("R5", 50.0);

        let mut draft = DraftState::standard();
        place(&mut draft, Team::Blue, champ("B1", &[]));
        for red in [
            champ("R1", &[]),
            champ("R2", &["B1"]),
            champ("R3", &["B1"]),
            champ("R4", &["B1"]),
            champ("R5", &["B1"]),
        ] {
            place(&mut draft, Team::Red, red);
        }

        let result = ScoringEngine::new(&stats).analyze(&draft, &SimulationConfig::default());
        assert_eq!(
            result.opponent_threats,
            vec![
                "R2 Name (Counter Pick!)".to_string(),
                "R3 Name (Counter Pick!)".to_string(),
                "R4 Name (Counter Pick!)".to_string(),
            ]
        );
        assert_eq!(result.blue_win_probability, 27);
    }

    #[test]
    fn probability_stays_in_bounds_on_builtin_drafts() {
        let catalog = Catalog::builtin();
        let stats = MockStatsProvider;
        let engine = ScoringEngine::new(&stats);
        let config = SimulationConfig::default();

        for offset in 0..catalog.len() {
            let mut draft = DraftState::standard();
            let mut pool = catalog.all().iter().cycle().skip(offset);
            for slot in draft.slots.iter_mut() {
                slot.champion = pool.next().cloned();
            }
            let result = engine.analyze(&draft, &config);
            assert!((10..=90).contains(&result.blue_win_probability));
            assert_eq!(result, engine.analyze(&draft, &config));
        }
    }
}
