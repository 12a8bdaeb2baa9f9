use crate::core::models::participant::{Participant, PersonalityType};
use crate::core::models::team::Team;
use rand::Rng;

/// Score given to a candidate whose game already appears twice in the team.
pub const HARD_CONSTRAINT_PENALTY: f64 = -999_999.0;

const MAX_SAME_GAME: usize = 2;
const JITTER_RANGE: f64 = 3.0;
const SKILL_SPREAD_WEIGHT: f64 = 2.0;

fn game_rarity_bonus(same_game: usize) -> f64 {
    match same_game {
        0 => 20.0,
        1 => 10.0,
        _ => 0.0,
    }
}

fn role_novelty_bonus(team: &Team, capacity: usize, candidate: &Participant) -> f64 {
    let role_is_new = !team.has_role(candidate.preferred_role());
    let mut bonus = if role_is_new { 15.0 } else { 0.0 };
    if capacity > 5 && team.size() >= 3 && team.distinct_roles() < 3 && role_is_new {
        bonus += 10.0;
    }
    bonus
}

fn personality_fit(team: &Team, capacity: usize, candidate: &Participant) -> f64 {
    let mix = team.personality_mix();
    match candidate.personality_type() {
        PersonalityType::Leader => {
            if mix.leaders == 0 {
                12.0
            } else {
                -20.0
            }
        }
        PersonalityType::Thinker => match mix.thinkers {
            0 => 10.0,
            1 if capacity > 3 => 8.0,
            _ => -10.0,
        },
        PersonalityType::Balanced => {
            if mix.leaders > 0 && mix.thinkers > 0 {
                6.0
            } else if team.size() + 2 >= capacity {
                4.0
            } else {
                2.0
            }
        }
    }
}

/// Population standard deviation of skill levels over the team plus the candidate, `0.0`
/// when the team is still empty.
pub fn skill_spread(team: &Team, candidate: &Participant) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    let skills: Vec<f64> = team
        .members()
        .iter()
        .chain(std::iter::once(candidate))
        .map(|member| f64::from(member.skill_level()))
        .collect();
    let n = skills.len() as f64;
    let mean = skills.iter().sum::<f64>() / n;
    let variance = skills.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Deterministic part of the fit score of `candidate` joining `team`.
///
/// `capacity` is the number of seats the team was opened with.
pub fn evaluate(team: &Team, capacity: usize, candidate: &Participant) -> f64 {
    let same_game = team.count_game(candidate.preferred_game());
    if same_game >= MAX_SAME_GAME {
        return HARD_CONSTRAINT_PENALTY;
    }

    game_rarity_bonus(same_game)
        + role_novelty_bonus(team, capacity, candidate)
        + personality_fit(team, capacity, candidate)
        - SKILL_SPREAD_WEIGHT * skill_spread(team, candidate)
}

/// Fit score with a uniform `[0, 3)` jitter drawn from the attempt's random source.
#[inline]
pub fn run<R: Rng>(
    team: &Team,
    capacity: usize,
    candidate: &Participant,
    rng: &mut R,
) -> f64 {
    let base = evaluate(team, capacity, candidate);
    if base == HARD_CONSTRAINT_PENALTY {
        return base;
    }
    base + rng.gen_range(0.0..JITTER_RANGE)
}
