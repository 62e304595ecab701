use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Unknown champion: {0}")]
    UnknownChampion(String),

    #[error("{0} is already picked or banned in this draft")]
    ChampionAlreadyUsed(String),

    #[error("Slot {0} does not exist (draft has 20 slots)")]
    SlotOutOfRange(usize),

    #[error("No slot is active, activate one first")]
    NoActiveSlot,

    #[error("Too many {0} for one team")]
    TeamFull(String),
}
