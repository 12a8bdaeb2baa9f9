use crate::cli::RegisterArgs;
use crate::error::{CliError, Result};
use teammate::core::io::roster::{self, RosterError};
use teammate::core::models::participant::{Participant, Role};
use teammate::core::survey;
use tracing::info;

fn build_participant(args: &RegisterArgs, existing: &[Participant]) -> Result<Participant> {
    let game = survey::catalog_game(&args.game).ok_or_else(|| {
        CliError::Argument(format!(
            "Unknown game '{}'. Choose one of: {}",
            args.game,
            survey::GAME_CATALOG.join(", ")
        ))
    })?;
    let role: Role = args.role.parse()?;
    let answers = survey::parse_answers(&args.answers)?;
    let personality_score = survey::score_answers(&answers)?;

    Ok(Participant::new(
        roster::next_participant_id(existing),
        args.name.trim(),
        args.email.trim(),
        game,
        args.skill,
        role,
        personality_score,
    )?)
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let existing = match roster::read_participants(&args.input) {
        Ok(participants) => participants,
        Err(RosterError::NotFound { .. }) => {
            info!("Roster {:?} does not exist yet; starting a new one.", &args.input);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    let participant = build_participant(&args, &existing)?;
    roster::append_participant(&args.input, &participant)?;

    info!("Registered participant {}", participant.id());
    println!("✓ Registered: {}", participant);
    println!(
        "  Personality score {} ({})",
        participant.personality_score(),
        participant.personality_type()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teammate::core::models::participant::PersonalityType;
    use tempfile::tempdir;

    fn args(input: std::path::PathBuf, game: &str, answers: &str) -> RegisterArgs {
        RegisterArgs {
            input,
            name: "Robin".to_string(),
            email: "robin@club.test".to_string(),
            game: game.to_string(),
            role: "supporter".to_string(),
            skill: 6,
            answers: answers.to_string(),
        }
    }

    #[test]
    fn register_creates_roster_and_assigns_sequential_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("participants.csv");

        run(args(path.clone(), "valorant", "5,5,5,4,4")).unwrap();
        run(args(path.clone(), "Chess", "1,2,1,2,1")).unwrap();

        let roster = roster::read_participants(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id(), "P001");
        assert_eq!(roster[0].preferred_game(), "Valorant");
        assert_eq!(roster[0].personality_score(), 92);
        assert_eq!(roster[0].personality_type(), PersonalityType::Leader);
        assert_eq!(roster[1].id(), "P002");
        assert_eq!(roster[1].personality_type(), PersonalityType::Thinker);
    }

    #[test]
    fn unknown_game_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("participants.csv");
        let result = run(args(path.clone(), "Tennis", "3,3,3,3,3"));
        assert!(matches!(result, Err(CliError::Argument(_))));
        assert!(!path.exists());
    }

    #[test]
    fn invalid_answers_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("participants.csv");
        let result = run(args(path, "FIFA", "3,3,9,3,3"));
        assert!(matches!(result, Err(CliError::Survey(_))));
    }
}
