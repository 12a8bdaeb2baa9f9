use std::path::PathBuf;
use teammate::core::io::roster::RosterError;
use teammate::core::models::participant::ParticipantError;
use teammate::core::survey::SurveyError;
use teammate::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    TeamMateCore(#[from] EngineError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("Invalid participant: {0}")]
    Participant(#[from] ParticipantError),

    #[error("Invalid survey answers: {0}")]
    Survey(#[from] SurveyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}
