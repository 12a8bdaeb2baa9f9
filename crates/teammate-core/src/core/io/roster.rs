use crate::core::models::participant::{Participant, ParticipantError, Role};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

pub const ROSTER_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "Email",
    "PreferredGame",
    "SkillLevel",
    "PreferredRole",
    "PersonalityScore",
    "PersonalityType",
];

/// Minimum number of fields a data row must carry; the trailing personality type column is
/// optional and never trusted.
const REQUIRED_FIELDS: usize = 7;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Participants file not found: '{path}'")]
    NotFound { path: String },
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Participants file '{path}' is empty")]
    Empty { path: String },
    #[error("Invalid number in field '{field}' on line {line} of '{path}' (value: '{value}')")]
    InvalidNumber {
        path: String,
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("Invalid participant on line {line} of '{path}': {source}")]
    InvalidParticipant {
        path: String,
        line: u64,
        source: ParticipantError,
    },
}

#[derive(Debug, Serialize)]
struct RosterRow<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    preferred_game: &'a str,
    skill_level: u8,
    preferred_role: String,
    personality_score: u32,
    personality_type: String,
}

impl<'a> From<&'a Participant> for RosterRow<'a> {
    fn from(participant: &'a Participant) -> Self {
        Self {
            id: participant.id(),
            name: participant.name(),
            email: participant.email(),
            preferred_game: participant.preferred_game(),
            skill_level: participant.skill_level(),
            preferred_role: participant.preferred_role().to_string(),
            personality_score: participant.personality_score(),
            personality_type: participant.personality_type().to_string(),
        }
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn parse_number<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    path: &Path,
    line: u64,
) -> Result<T, RosterError> {
    raw.trim().parse().map_err(|_| RosterError::InvalidNumber {
        path: display_path(path),
        line,
        field,
        value: raw.trim().to_string(),
    })
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn parse_record(record: &StringRecord, path: &Path, line: u64) -> Result<Participant, RosterError> {
    let invalid = |source: ParticipantError| RosterError::InvalidParticipant {
        path: display_path(path),
        line,
        source,
    };

    let skill: i64 = parse_number(field(record, 4), "skill level", path, line)?;
    let role: Role = field(record, 5).parse().map_err(invalid)?;
    let score: i64 = parse_number(field(record, 6), "personality score", path, line)?;
    // Negative scores classify as Thinker, same as zero.
    let score = u32::try_from(score.max(0)).unwrap_or(u32::MAX);
    let skill = u8::try_from(skill)
        .map_err(|_| invalid(ParticipantError::SkillOutOfRange(skill)))?;

    Participant::new(
        field(record, 0),
        field(record, 1),
        field(record, 2),
        field(record, 3),
        skill,
        role,
        score,
    ).map_err(invalid)
}

/// Loads every participant from a roster CSV file.
///
/// The first line is a header and is skipped. Blank lines are ignored and rows with fewer
/// than seven fields are skipped with a warning. A malformed number, unknown role or
/// out-of-range skill level aborts the load and reports the offending line.
pub fn read_participants(path: impl AsRef<Path>) -> Result<Vec<Participant>, RosterError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RosterError::NotFound {
            path: display_path(path),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| RosterError::Csv {
            path: display_path(path),
            source: e,
        })?;

    let header_is_empty = reader
        .headers()
        .map_err(|e| RosterError::Csv {
            path: display_path(path),
            source: e,
        })?
        .is_empty();
    if header_is_empty {
        return Err(RosterError::Empty {
            path: display_path(path),
        });
    }

    let mut participants = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| RosterError::Csv {
            path: display_path(path),
            source: e,
        })?;
        let line = record.position().map_or(0, |position| position.line());

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < REQUIRED_FIELDS {
            warn!(
                "Skipping malformed line {} of '{}': {} fields",
                line,
                path.display(),
                record.len()
            );
            continue;
        }

        participants.push(parse_record(&record, path, line)?);
    }

    debug!(
        "Loaded {} participants from '{}'.",
        participants.len(),
        path.display()
    );
    Ok(participants)
}

/// Appends one participant to a roster file without rewriting existing rows.
///
/// A missing or empty file receives the header row first.
pub fn append_participant(
    path: impl AsRef<Path>,
    participant: &Participant,
) -> Result<(), RosterError> {
    let path = path.as_ref();
    let io_error = |e: io::Error| RosterError::Io {
        path: display_path(path),
        source: e,
    };
    let csv_error = |e: csv::Error| RosterError::Csv {
        path: display_path(path),
        source: e,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    let needs_header = file.metadata().map_err(io_error)?.len() == 0;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if needs_header {
        writer.write_record(ROSTER_HEADER).map_err(csv_error)?;
    }
    writer
        .serialize(RosterRow::from(participant))
        .map_err(csv_error)?;
    writer.flush().map_err(io_error)?;

    debug!("Appended participant {} to '{}'.", participant.id(), path.display());
    Ok(())
}

/// Identifier for the next registered participant, `P` followed by the 1-based roster
/// position padded to three digits.
pub fn next_participant_id(participants: &[Participant]) -> String {
    format!("P{:03}", participants.len() + 1)
}
