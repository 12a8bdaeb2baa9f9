//! Computational units of team formation.
//!
//! [`candidate_fit`] scores a single participant against a team under construction,
//! [`team_building`] grows a complete partition from a shuffled pool and [`quality_score`]
//! rates a finished partition so the search can compare attempts.

pub mod candidate_fit;
pub mod quality_score;
pub mod team_building;
