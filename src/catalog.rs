use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Bot => "Bot",
            Role::Support => "Support",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub id: String,
    pub name: String,
    pub roles: Vec<Role>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ids of champions this one is strong against. Not symmetric.
    #[serde(default)]
    pub counters: Vec<String>,
}

impl Champion {
    pub fn counters_champion(&self, other: &Champion) -> bool {
        self.counters.iter().any(|id| id == &other.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Read-only champion registry, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    champions: Vec<Champion>,
}

impl Catalog {
    pub fn new(champions: Vec<Champion>) -> Result<Self, AppError> {
        {
            let mut seen = HashSet::new();
            for champ in &champions {
                if !seen.insert(champ.id.as_str()) {
                    return Err(AppError::ConfigError(format!(
                        "duplicate champion id '{}' in catalog",
                        champ.id
                    )));
                }
            }

            for champ in &champions {
                for target in &champ.counters {
                    if !seen.contains(target.as_str()) {
                        warn!(champion = %champ.id, counter = %target, "counter target is not in the catalog");
                    }
                }
            }
        }

        debug!(count = champions.len(), "catalog loaded");
        Ok(Catalog { champions })
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let champions: Vec<Champion> = serde_json::from_str(json)
            .map_err(|e| AppError::JsonError(format!("Failed to parse catalog: {}", e)))?;
        Self::new(champions)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn builtin() -> Self {
        let champions = BUILTIN
            .iter()
            .map(|(id, name, roles, tags, counters)| Champion {
                id: id.to_string(),
                name: name.to_string(),
                roles: roles.to_vec(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                counters: counters.iter().map(|c| c.to_string()).collect(),
            })
            .collect();
        Catalog { champions }
    }

    pub fn all(&self) -> &[Champion] {
        &self.champions
    }

    pub fn get(&self, id: &str) -> Option<&Champion> {
        self.champions.iter().find(|c| c.id == id)
    }

    /// Case-insensitive lookup by id or display name, ignoring spaces and apostrophes.
    pub fn find_by_name(&self, query: &str) -> Option<&Champion> {
        let wanted = normalize(query);
        self.champions
            .iter()
            .find(|c| normalize(&c.id) == wanted || normalize(&c.name) == wanted)
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

type BuiltinEntry = (
    &'static str,
    &'static str,
    &'static [Role],
    &'static [&'static str],
    &'static [&'static str],
);

const BUILTIN: &[BuiltinEntry] = &[
    ("Aatrox", "Aatrox", &[Role::Top], &["Teamfight", "Sustain"], &["Sion", "Malphite"]),
    ("Renekton", "Renekton", &[Role::Top], &["EarlyGame", "Engage"], &["Aatrox", "Riven"]),
    ("Malphite", "Malphite", &[Role::Top, Role::Support], &["Engage", "Teamfight", "Tank"], &["Yasuo", "Jax", "Xayah"]),
    ("Sion", "Sion", &[Role::Top], &["Engage", "Tank", "Scaling"], &["Jax"]),
    ("Jax", "Jax", &[Role::Top, Role::Jungle], &["SplitPush", "Scaling"], &["Renekton", "Riven"]),
    ("Riven", "Riven", &[Role::Top], &["EarlyGame", "SplitPush"], &["Sion", "Aatrox"]),
    ("LeeSin", "Lee Sin", &[Role::Jungle], &["EarlyGame", "Engage"], &["Nidalee", "Kaisa"]),
    ("Sejuani", "Sejuani", &[Role::Jungle], &["Engage", "Teamfight", "Tank"], &["LeeSin", "Vi"]),
    ("Vi", "Vi", &[Role::Jungle], &["Engage", "EarlyGame"], &["Nidalee", "Azir"]),
    ("Maokai", "Maokai", &[Role::Jungle, Role::Support, Role::Top], &["Engage", "Teamfight", "Tank"], &["Vi", "LeeSin"]),
    ("Nidalee", "Nidalee", &[Role::Jungle], &["EarlyGame", "Poke"], &["Sejuani", "Maokai"]),
    ("Ahri", "Ahri", &[Role::Mid], &["Pick", "FollowUp"], &["Azir", "Syndra"]),
    ("Azir", "Azir", &[Role::Mid], &["Scaling", "Teamfight"], &["Orianna"]),
    ("Yasuo", "Yasuo", &[Role::Mid, Role::Top], &["FollowUp", "Teamfight"], &["Syndra", "Varus"]),
    ("Orianna", "Orianna", &[Role::Mid], &["Teamfight", "FollowUp", "Scaling"], &["Yasuo"]),
    ("Syndra", "Syndra", &[Role::Mid], &["Pick", "Burst"], &["Azir", "Orianna"]),
    ("Jinx", "Jinx", &[Role::Bot], &["Scaling", "Teamfight"], &["Varus"]),
    ("Varus", "Varus", &[Role::Bot, Role::Mid], &["Poke", "Pick"], &["Jinx", "Draven"]),
    ("Xayah", "Xayah", &[Role::Bot], &["Teamfight", "Disengage"], &["Draven", "Kaisa"]),
    ("Draven", "Draven", &[Role::Bot], &["EarlyGame"], &["Jinx"]),
    ("Kaisa", "Kai'Sa", &[Role::Bot], &["Scaling", "FollowUp"], &["Jinx", "Xayah"]),
    ("Thresh", "Thresh", &[Role::Support], &["Engage", "Pick"], &["Nautilus", "Kaisa"]),
    ("Nautilus", "Nautilus", &[Role::Support], &["Engage", "Tank"], &["Rakan", "Yasuo"]),
    ("Rakan", "Rakan", &[Role::Support], &["Engage", "FollowUp", "Teamfight"], &["Thresh"]),
    ("Lulu", "Lulu", &[Role::Support], &["Disengage", "Enchanter"], &["Draven", "Nautilus"]),
    ("Bard", "Bard", &[Role::Support], &["Pick", "Roam"], &["Lulu"]),
];
