use super::team::Team;
use std::collections::HashSet;

/// The ordered list of teams produced by a single construction attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    teams: Vec<Team>,
}

impl Partition {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn push(&mut self, team: Team) {
        self.teams.push(team);
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// A partition is empty when it holds no teams or only teams without members.
    pub fn is_empty(&self) -> bool {
        self.teams.iter().all(Team::is_empty)
    }

    pub fn total_members(&self) -> usize {
        self.teams.iter().map(Team::size).sum()
    }

    /// Assigns team numbers `1..=K` in partition order.
    pub fn number_teams(&mut self) {
        for (index, team) in self.teams.iter_mut().enumerate() {
            team.set_number(index + 1);
        }
    }

    /// Returns the identifiers that appear in more than one team.
    pub fn duplicated_members(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for member in self.teams.iter().flat_map(Team::members) {
            if !seen.insert(member.id()) {
                duplicates.push(member.id().to_string());
            }
        }
        duplicates
    }

    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }
}
