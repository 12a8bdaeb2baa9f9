use crate::core::models::participant::{Participant, PersonalityType};
use crate::core::models::partition::Partition;
use crate::core::models::statistics::TeamStatistics;
use crate::core::models::team::Team;
use crate::engine::config::{FormationConfig, FormationConfigBuilder};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::search;
use crate::engine::tasks::quality_score::QualityBreakdown;
use crate::engine::tasks::team_building::{GreedyTeamBuilder, PartitionStrategy};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct FormationResult {
    /// Winning teams, numbered `1..=K` in partition order.
    pub teams: Vec<Team>,
    pub quality: Option<QualityBreakdown>,
    pub unassigned: usize,
    pub attempts_launched: usize,
    pub attempts_completed: usize,
    pub attempts_failed: usize,
    pub timed_out: bool,
    pub seed: u64,
    pub elapsed: Duration,
}

impl FormationResult {
    pub fn assigned(&self) -> usize {
        self.teams.iter().map(Team::size).sum()
    }
}

/// Head counts needed for an exact team request compared to what the roster offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactRequestAssessment {
    pub participants_required: usize,
    pub participants_available: usize,
    pub leaders_required: usize,
    pub leaders_available: usize,
    pub thinkers_required: usize,
    pub thinkers_available: usize,
}

impl ExactRequestAssessment {
    pub fn is_feasible(&self) -> bool {
        self.participants_available >= self.participants_required
            && self.leaders_available >= self.leaders_required
            && self.thinkers_available >= self.thinkers_required
    }

    pub fn shortfalls(&self) -> Vec<String> {
        let mut shortfalls = Vec::new();
        let mut check = |label: &str, required: usize, available: usize| {
            if available < required {
                shortfalls.push(format!(
                    "need {required} {label}, only {available} available"
                ));
            }
        };
        check("participants", self.participants_required, self.participants_available);
        check("Leaders", self.leaders_required, self.leaders_available);
        check("Thinkers", self.thinkers_required, self.thinkers_available);
        shortfalls
    }
}

/// Checks whether `team_count` teams of `team_size` can be formed with one Leader each and
/// one Thinker each (two for teams larger than three).
pub fn assess_exact_request(
    participants: &[Participant],
    team_size: usize,
    team_count: usize,
) -> ExactRequestAssessment {
    let count = |wanted: PersonalityType| {
        participants
            .iter()
            .filter(|p| p.personality_type() == wanted)
            .count()
    };
    let thinkers_per_team = if team_size > 3 { 2 } else { 1 };
    ExactRequestAssessment {
        participants_required: team_size * team_count,
        participants_available: participants.len(),
        leaders_required: team_count,
        leaders_available: count(PersonalityType::Leader),
        thinkers_required: thinkers_per_team * team_count,
        thinkers_available: count(PersonalityType::Thinker),
    }
}

/// Forms as many full teams of `team_size` as the pool allows using default settings.
pub fn form_teams(participants: &[Participant], team_size: usize) -> Result<Vec<Team>, EngineError> {
    let config = FormationConfigBuilder::new().team_size(team_size).build()?;
    Ok(run(participants, &config, &ProgressReporter::new())?.teams)
}

/// Forms at most `team_count` teams of `team_size` using default settings.
///
/// Infeasible requests are not rejected; the result may hold fewer or smaller teams.
pub fn form_exact_teams(
    participants: &[Participant],
    team_size: usize,
    team_count: usize,
) -> Result<Vec<Team>, EngineError> {
    let config = FormationConfigBuilder::new()
        .team_size(team_size)
        .team_count(team_count)
        .build()?;
    Ok(run(participants, &config, &ProgressReporter::new())?.teams)
}

#[instrument(skip_all, name = "formation_workflow")]
pub fn run(
    participants: &[Participant],
    config: &FormationConfig,
    reporter: &ProgressReporter,
) -> Result<FormationResult, EngineError> {
    run_with_strategy(participants, config, Arc::new(GreedyTeamBuilder), reporter)
}

/// Same as [`run`] with a caller supplied construction strategy.
pub fn run_with_strategy(
    participants: &[Participant],
    config: &FormationConfig,
    strategy: Arc<dyn PartitionStrategy>,
    reporter: &ProgressReporter,
) -> Result<FormationResult, EngineError> {
    // === Phase 1: Request checks ===
    reporter.report(Progress::PhaseStart { name: "Preparation" });
    match config.team_count {
        Some(team_count) => {
            info!(
                "Starting team formation: {} participants, {} teams of size {}.",
                participants.len(),
                team_count,
                config.team_size
            );
            let assessment = assess_exact_request(participants, config.team_size, team_count);
            if !assessment.is_feasible() {
                let shortfalls = assessment.shortfalls().join("; ");
                warn!(
                    "Not enough participants for the requested teams: {}.",
                    shortfalls
                );
                reporter.report(Progress::Message(format!(
                    "Request cannot be fully met: {shortfalls}"
                )));
            }
        }
        None => info!(
            "Starting team formation: {} participants, target team size = {}.",
            participants.len(),
            config.team_size
        ),
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Parallel search ===
    reporter.report(Progress::PhaseStart { name: "Team Search" });
    let outcome = search::run(participants, config, strategy, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Numbering and statistics ===
    let (mut partition, quality) = match outcome.best {
        Some(winner) => (winner.partition, Some(winner.quality)),
        None => (Partition::empty(), None),
    };
    partition.number_teams();
    let teams = partition.into_teams();
    let assigned: usize = teams.iter().map(Team::size).sum();

    info!(
        "Team formation completed: {} teams created with {} participants.",
        teams.len(),
        assigned
    );
    log_team_statistics(&teams);

    Ok(FormationResult {
        unassigned: participants.len().saturating_sub(assigned),
        teams,
        quality,
        attempts_launched: outcome.attempts_launched,
        attempts_completed: outcome.completed,
        attempts_failed: outcome.failed,
        timed_out: outcome.timed_out,
        seed: outcome.seed,
        elapsed: outcome.elapsed,
    })
}

fn log_team_statistics(teams: &[Team]) {
    for team in teams {
        info!("{}", TeamStatistics::from_team(team));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::participant::Role;
    use crate::engine::config::TeamAcceptance;
    use std::collections::HashSet;

    const GAMES: [&str; 7] = [
        "FIFA",
        "Valorant",
        "CS:GO",
        "DOTA 2",
        "Basketball",
        "Chess",
        "Badminton",
    ];

    fn person(id: &str, game: &str, skill: u8, role: Role, score: u32) -> Participant {
        Participant::new(id, id, format!("{id}@club.test"), game, skill, role, score).unwrap()
    }

    fn varied_pool(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                person(
                    &format!("P{:04}", i + 1),
                    GAMES[(i * 3) % GAMES.len()],
                    (i * 7 % 10 + 1) as u8,
                    Role::ALL[(i / 2) % Role::ALL.len()],
                    ((i * 53) % 81 + 20) as u32,
                )
            })
            .collect()
    }

    fn assert_well_formed(teams: &[Team], team_size: usize) {
        let mut seen = HashSet::new();
        for team in teams {
            assert!(team.size() <= team_size);
            for member in team.members() {
                assert!(seen.insert(member.id().to_string()), "{} placed twice", member.id());
            }
        }
    }

    #[test]
    fn form_teams_respects_size_and_uniqueness() {
        let teams = form_teams(&varied_pool(47), 5).unwrap();
        assert!(!teams.is_empty());
        assert_well_formed(&teams, 5);
    }

    #[test]
    fn winning_teams_are_numbered_in_order() {
        let teams = form_teams(&varied_pool(30), 5).unwrap();
        let numbers: Vec<_> = teams.iter().map(Team::number).collect();
        let expected: Vec<_> = (1..=teams.len()).map(Some).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn empty_pool_forms_no_teams() {
        assert!(form_teams(&[], 5).unwrap().is_empty());
        assert!(form_exact_teams(&[], 5, 3).unwrap().is_empty());
    }

    #[test]
    fn zero_team_size_uses_default_of_five() {
        let teams = form_teams(&varied_pool(20), 0).unwrap();
        assert_eq!(teams.len(), 4);
        assert!(teams.iter().all(|team| team.size() == 5));
    }

    #[test]
    fn one_leader_and_one_thinker_form_a_single_pair() {
        let pool = vec![
            person("L", "Chess", 7, Role::Strategist, 96),
            person("T", "FIFA", 4, Role::Defender, 35),
        ];
        let teams = form_teams(&pool, 2).unwrap();
        assert_eq!(teams.len(), 1);
        let ids: HashSet<_> = teams[0].members().iter().map(Participant::id).collect();
        assert_eq!(ids, HashSet::from(["L", "T"]));
    }

    #[test]
    fn thousand_participants_finish_within_the_deadline() {
        let config = FormationConfigBuilder::new()
            .team_size(5)
            .attempts(4)
            .build()
            .unwrap();
        let result = run(&varied_pool(1000), &config, &ProgressReporter::new()).unwrap();
        assert!(!result.timed_out);
        assert_eq!(result.attempts_completed, 4);
        assert!(result.assigned() > 0);
        assert!(result.quality.is_some());
        assert_well_formed(&result.teams, 5);
    }

    #[test]
    fn exact_request_larger_than_pool_degrades_gracefully() {
        let pool = varied_pool(12);
        let teams = form_exact_teams(&pool, 5, 4).unwrap();
        assert!(teams.len() <= 4);
        assert!(teams.iter().map(Team::size).sum::<usize>() <= pool.len());
        assert_well_formed(&teams, 5);
    }

    #[test]
    fn infeasible_exact_request_is_reported_to_the_front_end() {
        let messages = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let reporter = ProgressReporter::with_callback(move |event| {
            if let Progress::Message(text) = event {
                sink.lock().unwrap().push(text);
            }
        });
        let config = FormationConfigBuilder::new()
            .team_size(5)
            .team_count(4)
            .build()
            .unwrap();
        run(&varied_pool(12), &config, &reporter).unwrap();
        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Request cannot be fully met"));
    }

    #[test]
    fn exact_request_never_exceeds_team_count() {
        let teams = form_exact_teams(&varied_pool(60), 4, 3).unwrap();
        assert_eq!(teams.len(), 3);
        assert!(teams.iter().all(|team| team.size() == 4));
    }

    #[test]
    fn result_reports_unassigned_participants() {
        let config = FormationConfigBuilder::new()
            .team_size(5)
            .seed(99)
            .build()
            .unwrap();
        let result = run(&varied_pool(23), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.assigned(), 20);
        assert_eq!(result.unassigned, 3);
        assert_eq!(result.seed, 99);
    }

    #[test]
    fn minimum_fill_policy_drops_short_teams() {
        let config = FormationConfigBuilder::new()
            .team_size(5)
            .acceptance(TeamAcceptance::MinimumFill(0.8))
            .build()
            .unwrap();
        let result = run(&varied_pool(3), &config, &ProgressReporter::new()).unwrap();
        assert!(result.teams.is_empty());
        assert_eq!(result.unassigned, 3);
    }

    #[test]
    fn assess_exact_request_reports_shortfalls() {
        let pool = vec![
            person("L", "Chess", 7, Role::Strategist, 96),
            person("T1", "FIFA", 4, Role::Defender, 35),
            person("B", "FIFA", 4, Role::Defender, 75),
        ];
        let assessment = assess_exact_request(&pool, 4, 2);
        assert!(!assessment.is_feasible());
        assert_eq!(assessment.participants_required, 8);
        assert_eq!(assessment.leaders_available, 1);
        assert_eq!(assessment.thinkers_required, 4);
        assert_eq!(
            assessment.shortfalls(),
            vec![
                "need 8 participants, only 3 available".to_string(),
                "need 2 Leaders, only 1 available".to_string(),
                "need 4 Thinkers, only 1 available".to_string(),
            ]
        );
    }

    #[test]
    fn assess_exact_request_accepts_satisfiable_request() {
        let pool = vec![
            person("L", "Chess", 7, Role::Strategist, 96),
            person("T", "FIFA", 4, Role::Defender, 35),
            person("B", "FIFA", 4, Role::Defender, 75),
        ];
        let assessment = assess_exact_request(&pool, 3, 1);
        assert!(assessment.is_feasible());
        assert!(assessment.shortfalls().is_empty());
    }
}
