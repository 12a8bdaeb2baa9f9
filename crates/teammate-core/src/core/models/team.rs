use super::participant::{Participant, PersonalityType, Role, game_key};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Counts of each personality type among a team's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersonalityMix {
    pub leaders: usize,
    pub balanced: usize,
    pub thinkers: usize,
}

impl PersonalityMix {
    pub fn record(&mut self, personality: PersonalityType) {
        match personality {
            PersonalityType::Leader => self.leaders += 1,
            PersonalityType::Balanced => self.balanced += 1,
            PersonalityType::Thinker => self.thinkers += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Team {
    number: Option<usize>, // Assigned after the winning partition is chosen
    members: Vec<Participant>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            number: None,
            members: Vec::with_capacity(capacity),
        }
    }

    pub fn from_members(members: Vec<Participant>) -> Self {
        Self {
            number: None,
            members,
        }
    }

    pub fn number(&self) -> Option<usize> {
        self.number
    }

    pub fn set_number(&mut self, number: usize) {
        self.number = Some(number);
    }

    pub fn add_member(&mut self, participant: Participant) {
        self.members.push(participant);
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Arithmetic mean of member skill levels, `0.0` for an empty team.
    pub fn average_skill(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: u32 = self
            .members
            .iter()
            .map(|member| u32::from(member.skill_level()))
            .sum();
        total as f64 / self.members.len() as f64
    }

    /// Number of members whose preferred game matches `game`, ignoring case.
    pub fn count_game(&self, game: &str) -> usize {
        self.members.iter().filter(|member| member.plays(game)).count()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.members
            .iter()
            .any(|member| member.preferred_role() == role)
    }

    pub fn distinct_roles(&self) -> usize {
        self.members
            .iter()
            .map(Participant::preferred_role)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Members per game, keyed by [`game_key`].
    pub fn game_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for member in &self.members {
            *counts.entry(game_key(member.preferred_game())).or_insert(0) += 1;
        }
        counts
    }

    pub fn personality_mix(&self) -> PersonalityMix {
        let mut mix = PersonalityMix::default();
        for member in &self.members {
            mix.record(member.personality_type());
        }
        mix
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => writeln!(f, "=== TEAM {} ({} members) ===", number, self.size())?,
            None => writeln!(f, "=== TEAM ({} members) ===", self.size())?,
        }
        for member in &self.members {
            writeln!(f, "  • {}", member)?;
        }
        writeln!(f, "Average skill: {:.2}", self.average_skill())
    }
}
