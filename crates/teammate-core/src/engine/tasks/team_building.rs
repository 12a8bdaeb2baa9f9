use super::candidate_fit;
use crate::core::models::participant::{Participant, PersonalityType};
use crate::core::models::partition::Partition;
use crate::core::models::team::Team;
use crate::engine::cancellation::CancellationToken;
use crate::engine::config::{FormationConfig, TeamAcceptance};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

/// Random source owned by a single construction attempt.
pub type AttemptRng = ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildParams {
    pub team_size: usize,
    pub max_teams: Option<usize>,
    pub acceptance: TeamAcceptance,
}

impl BuildParams {
    pub fn from_config(config: &FormationConfig) -> Self {
        Self {
            team_size: config.team_size.max(1),
            max_teams: config.team_count,
            acceptance: config.acceptance,
        }
    }

    fn may_add_team(&self, formed: usize) -> bool {
        self.max_teams.is_none_or(|max| formed < max)
    }
}

/// A way of turning a participant pool into one candidate partition.
///
/// Implementations run on worker threads, each call owning its pool copy and random source.
pub trait PartitionStrategy: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn build(
        &self,
        pool: Vec<Participant>,
        params: &BuildParams,
        rng: &mut AttemptRng,
        cancel: &CancellationToken,
    ) -> Partition;
}

/// Seeds each team with a Leader and Thinkers, then fills it greedily by candidate fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyTeamBuilder;

impl PartitionStrategy for GreedyTeamBuilder {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn build(
        &self,
        pool: Vec<Participant>,
        params: &BuildParams,
        rng: &mut AttemptRng,
        cancel: &CancellationToken,
    ) -> Partition {
        run(pool, params, rng, cancel)
    }
}

fn seed_personality(
    team: &mut Team,
    pool: &mut Vec<Participant>,
    wanted: PersonalityType,
    how_many: usize,
    capacity: usize,
) {
    let mut added = 0;
    let mut index = 0;
    while index < pool.len() && added < how_many && team.size() < capacity {
        if pool[index].personality_type() == wanted {
            team.add_member(pool.remove(index));
            added += 1;
        } else {
            index += 1;
        }
    }
}

fn best_candidate(
    team: &Team,
    capacity: usize,
    pool: &[Participant],
    rng: &mut AttemptRng,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in pool.iter().enumerate() {
        let score = candidate_fit::run(team, capacity, candidate, rng);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

fn build_team(pool: &mut Vec<Participant>, capacity: usize, rng: &mut AttemptRng) -> Team {
    let mut team = Team::with_capacity(capacity);

    seed_personality(&mut team, pool, PersonalityType::Leader, 1, capacity);
    let thinkers = if capacity <= 3 { 1 } else { 2 };
    seed_personality(&mut team, pool, PersonalityType::Thinker, thinkers, capacity);

    while team.size() < capacity {
        let Some(index) = best_candidate(&team, capacity, pool, rng) else {
            break;
        };
        team.add_member(pool.remove(index));
    }
    team
}

/// Builds one partition from an owned copy of the pool.
///
/// The pool is shuffled first so that attempts with different random streams diverge. In
/// unbounded mode no trailing team smaller than `team_size` is formed once at least one
/// team exists; leftover participants stay unassigned.
#[instrument(skip_all, name = "team_building_task", fields(team_size = params.team_size))]
pub fn run(
    mut pool: Vec<Participant>,
    params: &BuildParams,
    rng: &mut AttemptRng,
    cancel: &CancellationToken,
) -> Partition {
    pool.shuffle(rng);
    let mut partition = Partition::empty();
    let mut rejected = 0usize;

    while !pool.is_empty() && params.may_add_team(partition.len()) {
        if cancel.is_cancelled() {
            debug!("Cancellation requested; stopping after {} teams.", partition.len());
            break;
        }
        if pool.len() < params.team_size && !partition.teams().is_empty() {
            break;
        }

        let capacity = params.team_size.min(pool.len());
        let team = build_team(&mut pool, capacity, rng);

        if params.acceptance.accepts(team.size(), params.team_size) {
            trace!(size = team.size(), "Accepted team.");
            partition.push(team);
        } else {
            trace!(size = team.size(), "Rejected under-filled team.");
            rejected += 1;
        }
    }

    debug!(
        teams = partition.len(),
        rejected,
        unassigned = pool.len(),
        "Team building attempt finished."
    );
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::participant::Role;
    use rand::SeedableRng;
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
        Participant::new(id, id, "p@club.test", game, skill, role, score).unwrap()
    }

    fn varied_pool(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                person(
                    &format!("P{i:03}"),
                    GAMES[i % GAMES.len()],
                    (i % 10 + 1) as u8,
                    Role::ALL[i % Role::ALL.len()],
                    ((i * 37) % 101) as u32,
                )
            })
            .collect()
    }

    fn params(team_size: usize, max_teams: Option<usize>) -> BuildParams {
        BuildParams {
            team_size,
            max_teams,
            acceptance: TeamAcceptance::AnyMember,
        }
    }

    fn build(pool: Vec<Participant>, params: &BuildParams, seed: u64) -> Partition {
        let mut rng = AttemptRng::seed_from_u64(seed);
        run(pool, params, &mut rng, &CancellationToken::new())
    }

    #[test]
    fn teams_never_exceed_team_size_and_never_share_members() {
        let partition = build(varied_pool(53), &params(5, None), 3);
        assert!(!partition.is_empty());
        assert!(partition.teams().iter().all(|team| team.size() <= 5));
        assert!(partition.duplicated_members().is_empty());
    }

    #[test]
    fn unbounded_mode_forms_only_full_teams_when_pool_is_larger_than_team_size() {
        let partition = build(varied_pool(23), &params(5, None), 11);
        assert_eq!(partition.len(), 4);
        assert!(partition.teams().iter().all(|team| team.size() == 5));
        assert_eq!(partition.total_members(), 20);
    }

    #[test]
    fn pool_smaller_than_team_size_forms_one_short_team() {
        let partition = build(varied_pool(3), &params(5, None), 1);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.teams()[0].size(), 3);
    }

    #[test]
    fn empty_pool_yields_empty_partition() {
        let partition = build(Vec::new(), &params(5, None), 0);
        assert_eq!(partition.len(), 0);
        assert!(partition.is_empty());
    }

    #[test]
    fn leader_and_thinker_fill_a_team_of_two() {
        let pool = vec![
            person("T", "Chess", 3, Role::Defender, 30),
            person("L", "Chess", 8, Role::Strategist, 95),
        ];
        let partition = build(pool, &params(2, None), 5);
        assert_eq!(partition.len(), 1);
        let ids: HashSet<_> = partition.teams()[0].members().iter().map(Participant::id).collect();
        assert_eq!(ids, HashSet::from(["T", "L"]));
    }

    #[test]
    fn seeding_puts_the_leader_first() {
        let pool = vec![
            person("B1", "FIFA", 5, Role::Attacker, 75),
            person("L", "Chess", 5, Role::Strategist, 92),
            person("B2", "Valorant", 5, Role::Defender, 80),
        ];
        let partition = build(pool, &params(3, None), 9);
        assert_eq!(partition.teams()[0].members()[0].id(), "L");
    }

    #[test]
    fn max_teams_caps_the_partition() {
        let partition = build(varied_pool(40), &params(4, Some(3)), 2);
        assert_eq!(partition.len(), 3);
        assert_eq!(partition.total_members(), 12);
    }

    #[test]
    fn same_game_is_avoided_while_alternatives_exist() {
        let mut pool = Vec::new();
        for i in 0..6 {
            pool.push(person(&format!("C{i}"), "Chess", 5, Role::Attacker, 75));
        }
        for (i, game) in GAMES.iter().take(5).enumerate() {
            pool.push(person(&format!("F{i}"), game, 5, Role::Defender, 75));
        }
        let partition = build(pool, &params(4, Some(2)), 4);
        for team in partition.teams() {
            assert!(team.count_game("Chess") <= 2);
        }
    }

    #[test]
    fn violators_are_placed_when_nobody_else_is_left() {
        let pool: Vec<_> = (0..4)
            .map(|i| person(&format!("C{i}"), "Chess", 5, Role::Attacker, 75))
            .collect();
        let partition = build(pool, &params(4, None), 8);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.teams()[0].size(), 4);
    }

    #[test]
    fn minimum_fill_rejects_short_teams() {
        let strict = BuildParams {
            team_size: 5,
            max_teams: None,
            acceptance: TeamAcceptance::MinimumFill(0.8),
        };
        let partition = build(varied_pool(3), &strict, 6);
        assert_eq!(partition.len(), 0);
    }

    #[test]
    fn same_seed_reproduces_the_same_partition() {
        let first = build(varied_pool(60), &params(5, None), 42);
        let second = build(varied_pool(60), &params(5, None), 42);
        assert_eq!(first, second);
    }

    #[test]
    fn cancelled_token_stops_before_the_first_team() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut rng = AttemptRng::seed_from_u64(1);
        let partition = run(varied_pool(20), &params(5, None), &mut rng, &cancel);
        assert_eq!(partition.len(), 0);
    }

    #[test]
    fn greedy_strategy_delegates_to_run() {
        let strategy = GreedyTeamBuilder;
        let mut rng = AttemptRng::seed_from_u64(12);
        let partition = strategy.build(
            varied_pool(10),
            &params(5, None),
            &mut rng,
            &CancellationToken::new(),
        );
        assert_eq!(strategy.name(), "greedy");
        assert_eq!(partition.len(), 2);
    }
}
