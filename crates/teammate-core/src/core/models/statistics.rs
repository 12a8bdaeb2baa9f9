use super::participant::{Participant, Role, game_key};
use super::team::{PersonalityMix, Team};
use std::collections::BTreeMap;
use std::fmt;

fn mean_skill<'a>(members: impl Iterator<Item = &'a Participant>) -> f64 {
    let (count, total) = members.fold((0usize, 0u32), |(count, total), member| {
        (count + 1, total + u32::from(member.skill_level()))
    });
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Club-wide summary of a participant roster.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterSummary {
    pub total: usize,
    pub personalities: PersonalityMix,
    pub average_skill: f64,
    pub games: BTreeMap<String, usize>,
    pub roles: BTreeMap<Role, usize>,
}

impl RosterSummary {
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut summary = Self {
            total: participants.len(),
            average_skill: mean_skill(participants.iter()),
            ..Self::default()
        };
        for participant in participants {
            summary.personalities.record(participant.personality_type());
            *summary
                .games
                .entry(game_key(participant.preferred_game()))
                .or_default() += 1;
            *summary.roles.entry(participant.preferred_role()).or_default() += 1;
        }
        summary
    }
}

impl fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total participants: {}", self.total)?;
        writeln!(f, "Leaders: {}", self.personalities.leaders)?;
        writeln!(f, "Balanced: {}", self.personalities.balanced)?;
        writeln!(f, "Thinkers: {}", self.personalities.thinkers)?;
        writeln!(f, "Average skill: {:.2}", self.average_skill)?;
        if !self.games.is_empty() {
            writeln!(f, "Games:")?;
            for (game, count) in &self.games {
                writeln!(f, "  {game}: {count}")?;
            }
        }
        if !self.roles.is_empty() {
            writeln!(f, "Roles:")?;
            for (role, count) in &self.roles {
                writeln!(f, "  {role}: {count}")?;
            }
        }
        Ok(())
    }
}

/// Composition of a single formed team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStatistics {
    pub number: Option<usize>,
    pub size: usize,
    pub average_skill: f64,
    pub games: BTreeMap<String, usize>,
    pub roles: BTreeMap<Role, usize>,
    pub personalities: PersonalityMix,
}

impl TeamStatistics {
    pub fn from_team(team: &Team) -> Self {
        let mut roles = BTreeMap::new();
        for member in team.members() {
            *roles.entry(member.preferred_role()).or_insert(0usize) += 1;
        }
        Self {
            number: team.number(),
            size: team.size(),
            average_skill: team.average_skill(),
            games: team.game_counts().into_iter().collect(),
            roles,
            personalities: team.personality_mix(),
        }
    }
}

impl fmt::Display for TeamStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let games = self
            .games
            .iter()
            .map(|(game, count)| format!("{game}×{count}"))
            .collect::<Vec<_>>()
            .join(", ");
        let roles = self
            .roles
            .iter()
            .map(|(role, count)| format!("{role}×{count}"))
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(number) = self.number {
            write!(f, "team {number}: ")?;
        }
        write!(
            f,
            "{} members, avg skill {:.2}, L/B/T {}/{}/{}, games [{}], roles [{}]",
            self.size,
            self.average_skill,
            self.personalities.leaders,
            self.personalities.balanced,
            self.personalities.thinkers,
            games,
            roles
        )
    }
}
