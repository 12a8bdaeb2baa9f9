use crate::core::models::partition::Partition;
use crate::core::models::team::Team;
use std::fmt;
use tracing::instrument;

pub const SKILL_BALANCE_WEIGHT: f64 = 20.0;
pub const GAME_VARIETY_WEIGHT: f64 = 15.0;
pub const ROLE_DIVERSITY_WEIGHT: f64 = 12.0;
pub const PERSONALITY_MIX_WEIGHT: f64 = 10.0;
pub const COVERAGE_BONUS_PER_MEMBER: f64 = 0.5;

/// Per-term values of a partition's quality score. Every term except the coverage bonus is
/// averaged over the partition's teams and reported before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualityBreakdown {
    pub skill_balance: f64,
    pub game_variety: f64,
    pub role_diversity: f64,
    pub personality_mix: f64,
    pub coverage_bonus: f64,
}

impl QualityBreakdown {
    pub fn total(&self) -> f64 {
        self.skill_balance * SKILL_BALANCE_WEIGHT
            + self.game_variety * GAME_VARIETY_WEIGHT
            + self.role_diversity * ROLE_DIVERSITY_WEIGHT
            + self.personality_mix * PERSONALITY_MIX_WEIGHT
            + self.coverage_bonus
    }
}

impl fmt::Display for QualityBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {:.2} (skill balance {:.2}, game variety {:.2}, role diversity {:.2}, personality mix {:.2}, coverage {:.1})",
            self.total(),
            self.skill_balance,
            self.game_variety,
            self.role_diversity,
            self.personality_mix,
            self.coverage_bonus
        )
    }
}

fn skill_balance(teams: &[Team]) -> f64 {
    let averages: Vec<f64> = teams.iter().map(Team::average_skill).collect();
    let n = averages.len() as f64;
    let mean = averages.iter().sum::<f64>() / n;
    let variance = averages.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
    (100.0 - variance).max(0.0)
}

fn game_variety(team: &Team) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    let counts = team.game_counts();
    if counts.values().any(|&count| count > 2) {
        0.0
    } else {
        counts.len() as f64 / team.size() as f64 * 100.0
    }
}

fn role_diversity(team: &Team) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    let distinct = team.distinct_roles();
    if team.size() > 5 && distinct < 3 {
        30.0
    } else {
        distinct as f64 / team.size() as f64 * 100.0
    }
}

fn personality_mix(team: &Team) -> f64 {
    let mix = team.personality_mix();
    let leader_term = match mix.leaders {
        1 => 30.0,
        0 => 10.0,
        _ => 0.0,
    };
    let thinker_term = match mix.thinkers {
        1 | 2 => 20.0,
        0 => 10.0,
        _ => 0.0,
    };
    50.0 + leader_term + thinker_term
}

fn mean_over(teams: &[Team], term: impl Fn(&Team) -> f64) -> f64 {
    teams.iter().map(term).sum::<f64>() / teams.len() as f64
}

/// Scores every term of `partition`. A partition without members scores zero everywhere.
pub fn breakdown(partition: &Partition) -> QualityBreakdown {
    if partition.is_empty() {
        return QualityBreakdown::default();
    }
    let teams = partition.teams();
    QualityBreakdown {
        skill_balance: skill_balance(teams),
        game_variety: mean_over(teams, game_variety),
        role_diversity: mean_over(teams, role_diversity),
        personality_mix: mean_over(teams, personality_mix),
        coverage_bonus: partition.total_members() as f64 * COVERAGE_BONUS_PER_MEMBER,
    }
}

/// Weighted quality of a partition; higher is better.
#[instrument(skip_all, name = "quality_score_task", fields(teams = partition.len()))]
pub fn run(partition: &Partition) -> QualityBreakdown {
    breakdown(partition)
}
