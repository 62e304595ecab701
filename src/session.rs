use crate::catalog::{Catalog, Champion};
use crate::draft::{DraftSlot, DraftState, SlotKind, Team};
use crate::error::AppError;
use crate::live::LiveGameFeed;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

const STARTING_PROBABILITY: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbabilityPoint {
    pub step: usize,
    pub probability: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeriesScore {
    pub blue: u32,
    pub red: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub winner: Team,
    pub final_probability: i32,
    pub game_id: Option<String>,
    pub finished_at: DateTime<Utc>,
}

/// Editing state around one draft: which slot is being edited, the probability
/// trail shown as a chart, and the running score of the series.
pub struct DraftSession<'a> {
    catalog: &'a Catalog,
    draft: DraftState,
    history: Vec<ProbabilityPoint>,
    score: SeriesScore,
    games: Vec<GameRecord>,
}

impl<'a> DraftSession<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        DraftSession {
            catalog,
            draft: DraftState::standard(),
            history: vec![ProbabilityPoint {
                step: 0,
                probability: STARTING_PROBABILITY,
            }],
            score: SeriesScore::default(),
            games: Vec::new(),
        }
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn active_slot(&self) -> Option<&DraftSlot> {
        self.draft.active_slot()
    }

    pub fn history(&self) -> &[ProbabilityPoint] {
        &self.history
    }

    pub fn score(&self) -> SeriesScore {
        self.score
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn activate_slot(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.draft.slots.len() {
            return Err(AppError::SlotOutOfRange(index));
        }
        for (i, slot) in self.draft.slots.iter_mut().enumerate() {
            slot.is_active = i == index;
        }
        Ok(())
    }

    pub fn deactivate(&mut self) {
        for slot in self.draft.slots.iter_mut() {
            slot.is_active = false;
        }
    }

    /// Put a champion (by id or display name) into the active slot and close it.
    pub fn select_champion(&mut self, query: &str) -> Result<&'a Champion, AppError> {
        let catalog: &'a Catalog = self.catalog;
        let index = self.draft.active_index().ok_or(AppError::NoActiveSlot)?;
        let champion = catalog
            .find_by_name(query)
            .ok_or_else(|| AppError::UnknownChampion(query.to_string()))?;

        if self.draft.is_used(&champion.id) {
            return Err(AppError::ChampionAlreadyUsed(champion.name.clone()));
        }

        let slot = &mut self.draft.slots[index];
        slot.champion = Some(champion.clone());
        slot.is_active = false;
        info!(champion = %champion.id, phase = ?slot.phase, "champion selected");
        Ok(champion)
    }

    /// Fill the next empty slot a team has for the given action.
    pub fn fill_next(
        &mut self,
        team: Team,
        kind: SlotKind,
        query: &str,
    ) -> Result<&'a Champion, AppError> {
        let index = self
            .draft
            .slots
            .iter()
            .position(|s| s.team == team && s.kind == kind && !s.is_filled())
            .ok_or_else(|| AppError::TeamFull(format!("{} {}s", team, kind)))?;
        self.activate_slot(index)?;
        let selected = self.select_champion(query);
        if selected.is_err() {
            self.deactivate();
        }
        selected
    }

    pub fn clear_slot(&mut self, index: usize) -> Result<(), AppError> {
        let slot = self
            .draft
            .slots
            .get_mut(index)
            .ok_or(AppError::SlotOutOfRange(index))?;
        slot.champion = None;
        Ok(())
    }

    pub fn record_probability(&mut self, probability: i32) {
        let step = self.history.last().map(|p| p.step + 1).unwrap_or(0);
        self.history.push(ProbabilityPoint { step, probability });
    }

    /// Fresh slots and a fresh probability trail. The series score is kept.
    pub fn reset(&mut self) {
        self.draft = DraftState::standard();
        self.history = vec![ProbabilityPoint {
            step: 0,
            probability: STARTING_PROBABILITY,
        }];
    }

    pub fn record_game_end(&mut self, winner: Team, game_id: Option<String>) {
        let final_probability = self
            .history
            .last()
            .map(|p| p.probability)
            .unwrap_or(STARTING_PROBABILITY);

        match winner {
            Team::Blue => self.score.blue += 1,
            Team::Red => self.score.red += 1,
        }
        self.games.push(GameRecord {
            winner,
            final_probability,
            game_id,
            finished_at: Utc::now(),
        });
        info!(%winner, blue = self.score.blue, red = self.score.red, "game finished, draft reset");
        self.reset();
    }

    /// Check the live feed once; a finished game is recorded and the draft reset.
    pub fn poll_live(&mut self, feed: &dyn LiveGameFeed) -> Option<Team> {
        match feed.check_status() {
            Ok(status) => {
                let winner = status.finished_winner()?;
                self.record_game_end(winner, status.game_id);
                Some(winner)
            }
            Err(e) => {
                warn!(error = %e, "live game feed check failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::{LiveGameResult, OfflineFeed};

    struct FinishedFeed(Team);

    impl LiveGameFeed for FinishedFeed {
        fn check_status(&self) -> Result<LiveGameResult, AppError> {
            Ok(LiveGameResult {
                active: false,
                winner: Some(self.0),
                game_id: Some("game-1".to_string()),
            })
        }
    }

    struct BrokenFeed;

    impl LiveGameFeed for BrokenFeed {
        fn check_status(&self) -> Result<LiveGameResult, AppError> {
            Err(AppError::HttpError("connection refused".to_string()))
        }
    }

    #[test]
    fn only_one_slot_is_active_at_a_time() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        session.activate_slot(3).unwrap();
        session.activate_slot(7).unwrap();

        let active: Vec<_> = session.draft().slots.iter().filter(|s| s.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(session.draft().active_index(), Some(7));
        assert!(matches!(session.activate_slot(20), Err(AppError::SlotOutOfRange(20))));
    }

    #[test]
    fn selecting_fills_active_slot_and_closes_it() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        session.activate_slot(6).unwrap();

        let picked = session.select_champion("lee sin").unwrap().id.clone();
        assert_eq!(picked, "LeeSin");
        assert!(session.active_slot().is_none());
        assert_eq!(session.draft().slots[6].champion.as_ref().map(|c| c.id.as_str()), Some("LeeSin"));
    }

    #[test]
    fn selection_rejects_duplicates_unknowns_and_missing_slot() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        assert!(matches!(session.select_champion("Ahri"), Err(AppError::NoActiveSlot)));

        session.fill_next(Team::Blue, SlotKind::Ban, "Ahri").unwrap();
        assert!(matches!(
            session.fill_next(Team::Red, SlotKind::Pick, "Ahri"),
            Err(AppError::ChampionAlreadyUsed(_))
        ));
        assert!(matches!(
            session.fill_next(Team::Red, SlotKind::Pick, "Teemo"),
            Err(AppError::UnknownChampion(_))
        ));
        assert!(session.active_slot().is_none());
    }

    #[test]
    fn fill_next_walks_team_slots_in_order() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        for name in ["Aatrox", "Vi", "Ahri", "Jinx", "Thresh"] {
            session.fill_next(Team::Red, SlotKind::Pick, name).unwrap();
        }
        let red: Vec<_> = session.draft().picks(Team::Red).iter().map(|c| c.id.clone()).collect();
        assert_eq!(red, vec!["Aatrox", "Vi", "Ahri", "Jinx", "Thresh"]);
        assert!(matches!(
            session.fill_next(Team::Red, SlotKind::Pick, "Bard"),
            Err(AppError::TeamFull(_))
        ));
    }

    #[test]
    fn cleared_slot_frees_the_champion() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        session.fill_next(Team::Blue, SlotKind::Ban, "Draven").unwrap();
        session.clear_slot(0).unwrap();
        assert!(!session.draft().is_used("Draven"));
        session.fill_next(Team::Red, SlotKind::Ban, "Draven").unwrap();
        assert!(session.clear_slot(99).is_err());
    }

    #[test]
    fn history_counts_steps_from_fifty() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        session.record_probability(54);
        session.record_probability(47);
        let steps: Vec<_> = session.history().iter().map(|p| (p.step, p.probability)).collect();
        assert_eq!(steps, vec![(0, 50), (1, 54), (2, 47)]);
    }

    #[test]
    fn finished_game_updates_score_and_resets_draft() {
        let catalog = Catalog::builtin();
        let mut session = DraftSession::new(&catalog);
        session.fill_next(Team::Blue, SlotKind::Pick, "Jinx").unwrap();
        session.record_probability(61);

        assert_eq!(session.poll_live(&OfflineFeed), None);
        assert_eq!(session.poll_live(&BrokenFeed), None);
        assert_eq!(session.draft().filled_count(), 1);

        assert_eq!(session.poll_live(&FinishedFeed(Team::Blue)), Some(Team::Blue));
        assert_eq!(session.score(), SeriesScore { blue: 1, red: 0 });
        assert_eq!(session.games()[0].final_probability, 61);
        assert_eq!(session.games()[0].game_id.as_deref(), Some("game-1"));
        assert_eq!(session.draft().filled_count(), 0);
        assert_eq!(session.history().len(), 1);

        session.record_game_end(Team::Red, None);
        assert_eq!(session.score(), SeriesScore { blue: 1, red: 1 });
    }
}
