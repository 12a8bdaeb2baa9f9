use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 10;

const LEADER_THRESHOLD: u32 = 90;
const BALANCED_THRESHOLD: u32 = 70;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParticipantError {
    #[error("Unknown role: '{0}'")]
    UnknownRole(String),
    #[error("Skill level {0} is outside the accepted range 1-10")]
    SkillOutOfRange(i64),
    #[error("Participant identifier cannot be empty")]
    EmptyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Strategist,
    Attacker,
    Defender,
    Supporter,
    Coordinator,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Strategist,
        Role::Attacker,
        Role::Defender,
        Role::Supporter,
        Role::Coordinator,
    ];
}

impl FromStr for Role {
    type Err = ParticipantError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strategist" => Ok(Role::Strategist),
            "attacker" => Ok(Role::Attacker),
            "defender" => Ok(Role::Defender),
            "supporter" => Ok(Role::Supporter),
            "coordinator" => Ok(Role::Coordinator),
            _ => Err(ParticipantError::UnknownRole(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Role::Strategist => "Strategist",
                Role::Attacker => "Attacker",
                Role::Defender => "Defender",
                Role::Supporter => "Supporter",
                Role::Coordinator => "Coordinator",
            }
        )
    }
}

/// Normalized form of a game name used for every game comparison and count.
pub fn game_key(game: &str) -> String {
    game.to_lowercase()
}

/// Personality classification derived from a participant's survey score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonalityType {
    Leader,
    Balanced,
    Thinker,
}

impl PersonalityType {
    /// Classifies a personality score: 90 and above is a Leader, 70 to 89 is Balanced and
    /// anything lower is a Thinker.
    pub fn from_score(score: u32) -> Self {
        if score >= LEADER_THRESHOLD {
            PersonalityType::Leader
        } else if score >= BALANCED_THRESHOLD {
            PersonalityType::Balanced
        } else {
            PersonalityType::Thinker
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PersonalityType::Leader => "Leader",
                PersonalityType::Balanced => "Balanced",
                PersonalityType::Thinker => "Thinker",
            }
        )
    }
}

/// An immutable club member record.
///
/// The personality type is never stored; [`Participant::personality_type`] recomputes it
/// from the score every time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id: String,
    name: String,
    email: String,
    preferred_game: String,
    skill_level: u8,
    preferred_role: Role,
    personality_score: u32,
}

impl Participant {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        preferred_game: impl Into<String>,
        skill_level: u8,
        preferred_role: Role,
        personality_score: u32,
    ) -> Result<Self, ParticipantError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParticipantError::EmptyId);
        }
        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill_level) {
            return Err(ParticipantError::SkillOutOfRange(skill_level as i64));
        }
        Ok(Self {
            id,
            name: name.into(),
            email: email.into(),
            preferred_game: preferred_game.into(),
            skill_level,
            preferred_role,
            personality_score,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn preferred_game(&self) -> &str {
        &self.preferred_game
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    pub fn preferred_role(&self) -> Role {
        self.preferred_role
    }

    pub fn personality_score(&self) -> u32 {
        self.personality_score
    }

    #[inline]
    pub fn personality_type(&self) -> PersonalityType {
        PersonalityType::from_score(self.personality_score)
    }

    /// Case-insensitive comparison against another game name.
    pub fn plays(&self, game: &str) -> bool {
        game_key(&self.preferred_game) == game_key(game)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} | Role: {} | Skill: {} | {}",
            self.name,
            self.preferred_game,
            self.personality_type(),
            self.preferred_role,
            self.skill_level,
            self.id
        )
    }
}
