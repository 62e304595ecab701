use crate::catalog::Champion;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Blue => write!(f, "blue"),
            Team::Red => write!(f, "red"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Pick,
    Ban,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Pick => write!(f, "pick"),
            SlotKind::Ban => write!(f, "ban"),
        }
    }
}

/// Turn order of a standard tournament draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftPhase {
    BlueBan1,
    RedBan1,
    BlueBan2,
    RedBan2,
    BlueBan3,
    RedBan3,
    BluePick1,
    RedPick1,
    RedPick2,
    BluePick2,
    BluePick3,
    RedPick3,
    RedBan4,
    BlueBan4,
    RedBan5,
    BlueBan5,
    RedPick4,
    BluePick4,
    BluePick5,
    RedPick5,
    Complete,
}

impl DraftPhase {
    /// Every phase that owns a slot, in draft order. `Complete` is excluded.
    pub const ORDER: [DraftPhase; 20] = [
        DraftPhase::BlueBan1,
        DraftPhase::RedBan1,
        DraftPhase::BlueBan2,
        DraftPhase::RedBan2,
        DraftPhase::BlueBan3,
        DraftPhase::RedBan3,
        DraftPhase::BluePick1,
        DraftPhase::RedPick1,
        DraftPhase::RedPick2,
        DraftPhase::BluePick2,
        DraftPhase::BluePick3,
        DraftPhase::RedPick3,
        DraftPhase::RedBan4,
        DraftPhase::BlueBan4,
        DraftPhase::RedBan5,
        DraftPhase::BlueBan5,
        DraftPhase::RedPick4,
        DraftPhase::BluePick4,
        DraftPhase::BluePick5,
        DraftPhase::RedPick5,
    ];

    /// Owning team and action, or `None` for `Complete`.
    pub fn turn(self) -> Option<(Team, SlotKind)> {
        use DraftPhase::*;
        let turn = match self {
            BlueBan1 | BlueBan2 | BlueBan3 | BlueBan4 | BlueBan5 => (Team::Blue, SlotKind::Ban),
            RedBan1 | RedBan2 | RedBan3 | RedBan4 | RedBan5 => (Team::Red, SlotKind::Ban),
            BluePick1 | BluePick2 | BluePick3 | BluePick4 | BluePick5 => (Team::Blue, SlotKind::Pick),
            RedPick1 | RedPick2 | RedPick3 | RedPick4 | RedPick5 => (Team::Red, SlotKind::Pick),
            Complete => return None,
        };
        Some(turn)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftSlot {
    pub phase: DraftPhase,
    pub team: Team,
    pub kind: SlotKind,
    pub champion: Option<Champion>,
    pub is_active: bool,
}

impl DraftSlot {
    pub fn new(phase: DraftPhase, team: Team, kind: SlotKind) -> Self {
        DraftSlot {
            phase,
            team,
            kind,
            champion: None,
            is_active: false,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.champion.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    pub slots: Vec<DraftSlot>,
}

impl DraftState {
    /// Fresh 20-slot draft: 10 bans and 10 picks in tournament order.
    pub fn standard() -> Self {
        let slots = DraftPhase::ORDER
            .iter()
            .filter_map(|&phase| {
                phase
                    .turn()
                    .map(|(team, kind)| DraftSlot::new(phase, team, kind))
            })
            .collect();
        DraftState { slots }
    }

    /// Filled picks for one team, in slot order.
    pub fn picks(&self, team: Team) -> Vec<&Champion> {
        self.filled(team, SlotKind::Pick)
    }

    pub fn bans(&self, team: Team) -> Vec<&Champion> {
        self.filled(team, SlotKind::Ban)
    }

    fn filled(&self, team: Team, kind: SlotKind) -> Vec<&Champion> {
        self.slots
            .iter()
            .filter(|s| s.team == team && s.kind == kind)
            .filter_map(|s| s.champion.as_ref())
            .collect()
    }

    /// Ids of every champion sitting in a filled slot, picks and bans alike.
    pub fn used_ids(&self) -> HashSet<&str> {
        self.slots
            .iter()
            .filter_map(|s| s.champion.as_ref())
            .map(|c| c.id.as_str())
            .collect()
    }

    pub fn is_used(&self, id: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.champion.as_ref().map(|c| c.id == id).unwrap_or(false))
    }

    pub fn active_slot(&self) -> Option<&DraftSlot> {
        self.slots.iter().find(|s| s.is_active)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_active)
    }

    /// First phase whose slot is still empty, or `Complete`.
    pub fn current_phase(&self) -> DraftPhase {
        self.slots
            .iter()
            .find(|s| !s.is_filled())
            .map(|s| s.phase)
            .unwrap_or(DraftPhase::Complete)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_filled()).count()
    }
}
