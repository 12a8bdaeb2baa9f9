use super::roster::RosterError;
use crate::core::models::team::Team;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const TEAMS_HEADER: [&str; 7] = [
    "TeamNumber",
    "ParticipantID",
    "Name",
    "Game",
    "Role",
    "Personality",
    "Skill",
];

#[derive(Debug, Serialize)]
struct TeamExportRow<'a> {
    team: String,
    participant_id: &'a str,
    name: &'a str,
    game: &'a str,
    role: String,
    personality: String,
    skill: u8,
}

/// Writes formed teams to a CSV file, replacing any previous contents.
///
/// Each member becomes one row labelled `Team N`. Teams that have not been numbered yet are
/// labelled by their 1-based position.
pub fn write_teams(path: impl AsRef<Path>, teams: &[Team]) -> Result<(), RosterError> {
    let path = path.as_ref();
    let csv_error = |e: csv::Error| RosterError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(TEAMS_HEADER).map_err(csv_error)?;

    for (index, team) in teams.iter().enumerate() {
        let label = format!("Team {}", team.number().unwrap_or(index + 1));
        for member in team.members() {
            writer
                .serialize(TeamExportRow {
                    team: label.clone(),
                    participant_id: member.id(),
                    name: member.name(),
                    game: member.preferred_game(),
                    role: member.preferred_role().to_string(),
                    personality: member.personality_type().to_string(),
                    skill: member.skill_level(),
                })
                .map_err(csv_error)?;
        }
    }

    writer.flush().map_err(|e| RosterError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    info!("Teams successfully saved to '{}'.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::participant::{Participant, Role};
    use std::fs;
    use tempfile::tempdir;

    fn member(id: &str, name: &str, score: u32) -> Participant {
        Participant::new(id, name, "m@club.test", "Chess", 6, Role::Coordinator, score).unwrap()
    }

    #[test]
    fn write_teams_emits_header_and_one_row_per_member() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formed_teams.csv");
        let mut first = Team::from_members(vec![member("P001", "Alex", 95), member("P002", "Sam", 30)]);
        let mut second = Team::from_members(vec![member("P003", "Robin", 75)]);
        first.set_number(1);
        second.set_number(2);

        write_teams(&path, &[first, second]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "TeamNumber,ParticipantID,Name,Game,Role,Personality,Skill",
                "Team 1,P001,Alex,Chess,Coordinator,Leader,6",
                "Team 1,P002,Sam,Chess,Coordinator,Thinker,6",
                "Team 2,P003,Robin,Chess,Coordinator,Balanced,6",
            ]
        );
    }

    #[test]
    fn write_teams_labels_unnumbered_teams_by_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formed_teams.csv");
        let teams = vec![
            Team::from_members(vec![member("P001", "Alex", 95)]),
            Team::from_members(vec![member("P002", "Sam", 30)]),
        ];
        write_teams(&path, &teams).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Team 2,P002,Sam"));
    }

    #[test]
    fn write_teams_overwrites_previous_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formed_teams.csv");
        fs::write(&path, "stale contents\n").unwrap();
        write_teams(&path, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "TeamNumber,ParticipantID,Name,Game,Role,Personality,Skill\n");
    }
}
