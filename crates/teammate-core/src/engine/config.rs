use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_TEAM_SIZE: usize = 5;
pub const DEFAULT_ATTEMPTS: usize = 4;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MIN_FILL_RATIO: f64 = 0.8;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Decides whether a freshly built team is kept in the partition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TeamAcceptance {
    /// Keep any team with at least one member.
    #[default]
    AnyMember,
    /// Keep a team only if it holds at least `ceil(ratio * team_size)` members.
    MinimumFill(f64),
}

impl TeamAcceptance {
    pub fn minimum_members(&self, team_size: usize) -> usize {
        match *self {
            TeamAcceptance::AnyMember => 1,
            TeamAcceptance::MinimumFill(ratio) => ((ratio * team_size as f64).ceil() as usize).max(1),
        }
    }

    #[inline]
    pub fn accepts(&self, members: usize, team_size: usize) -> bool {
        members >= self.minimum_members(team_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormationConfig {
    pub team_size: usize,
    /// Upper bound on the number of teams; `None` builds as many as the pool allows.
    pub team_count: Option<usize>,
    pub attempts: usize,
    pub timeout: Duration,
    /// Run seed; each attempt derives its own random stream from it.
    pub seed: Option<u64>,
    pub acceptance: TeamAcceptance,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            team_count: None,
            attempts: DEFAULT_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
            acceptance: TeamAcceptance::AnyMember,
        }
    }
}

#[derive(Default)]
pub struct FormationConfigBuilder {
    team_size: Option<usize>,
    team_count: Option<usize>,
    attempts: Option<usize>,
    timeout: Option<Duration>,
    seed: Option<u64>,
    acceptance: Option<TeamAcceptance>,
}

impl FormationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team_size(mut self, size: usize) -> Self {
        self.team_size = Some(size);
        self
    }
    pub fn team_count(mut self, count: usize) -> Self {
        self.team_count = Some(count);
        self
    }
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = Some(attempts);
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn acceptance(mut self, acceptance: TeamAcceptance) -> Self {
        self.acceptance = Some(acceptance);
        self
    }

    pub fn build(self) -> Result<FormationConfig, ConfigError> {
        let team_size = match self.team_size {
            Some(0) => {
                warn!(
                    "Team size 0 is not usable; falling back to {}.",
                    DEFAULT_TEAM_SIZE
                );
                DEFAULT_TEAM_SIZE
            }
            Some(size) => size,
            None => DEFAULT_TEAM_SIZE,
        };

        let team_count = match self.team_count {
            Some(0) => {
                warn!("Team count 0 is not usable; forming a single team.");
                Some(1)
            }
            other => other,
        };

        let attempts = self.attempts.unwrap_or(DEFAULT_ATTEMPTS);
        if attempts == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "attempts",
                reason: "at least one attempt is required".to_string(),
            });
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidParameter {
                name: "timeout",
                reason: "the deadline must be longer than zero".to_string(),
            });
        }

        let acceptance = self.acceptance.unwrap_or_default();
        if let TeamAcceptance::MinimumFill(ratio) = acceptance {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "min_fill",
                    reason: format!("ratio {ratio} is outside (0, 1]"),
                });
            }
        }

        Ok(FormationConfig {
            team_size,
            team_count,
            attempts,
            timeout,
            seed: self.seed,
            acceptance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_parameters_uses_defaults() {
        let config = FormationConfigBuilder::new().build().unwrap();
        assert_eq!(config, FormationConfig::default());
        assert_eq!(config.team_size, 5);
        assert_eq!(config.attempts, 4);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.team_count, None);
    }

    #[test]
    fn zero_team_size_falls_back_to_default() {
        let config = FormationConfigBuilder::new().team_size(0).build().unwrap();
        assert_eq!(config.team_size, DEFAULT_TEAM_SIZE);
    }

    #[test]
    fn zero_team_count_is_raised_to_one() {
        let config = FormationConfigBuilder::new().team_count(0).build().unwrap();
        assert_eq!(config.team_count, Some(1));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let result = FormationConfigBuilder::new().attempts(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "attempts", .. })
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = FormationConfigBuilder::new().timeout(Duration::ZERO).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "timeout", .. })
        ));
    }

    #[test]
    fn fill_ratio_must_lie_in_unit_interval() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let result = FormationConfigBuilder::new()
                .acceptance(TeamAcceptance::MinimumFill(ratio))
                .build();
            assert!(
                matches!(
                    result,
                    Err(ConfigError::InvalidParameter { name: "min_fill", .. })
                ),
                "ratio {ratio} should be rejected"
            );
        }
        let config = FormationConfigBuilder::new()
            .acceptance(TeamAcceptance::MinimumFill(1.0))
            .build()
            .unwrap();
        assert_eq!(config.acceptance, TeamAcceptance::MinimumFill(1.0));
    }

    #[test]
    fn minimum_fill_rounds_up() {
        let policy = TeamAcceptance::MinimumFill(DEFAULT_MIN_FILL_RATIO);
        assert_eq!(policy.minimum_members(5), 4);
        assert_eq!(policy.minimum_members(3), 3);
        assert!(policy.accepts(4, 5));
        assert!(!policy.accepts(3, 5));
        assert_eq!(TeamAcceptance::AnyMember.minimum_members(5), 1);
        assert!(!TeamAcceptance::AnyMember.accepts(0, 5));
    }
}
