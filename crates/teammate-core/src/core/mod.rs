//! # Core Module
//!
//! The fundamental building blocks of TeamMate: the participant, team and partition
//! models, file I/O for rosters and formed teams, roster statistics and the personality
//! survey used at registration time.
//!
//! ## Architecture
//!
//! - **Domain Models** ([`models`]) - Participants, derived personality types, roles, teams,
//!   partitions and statistics
//! - **File I/O** ([`io`]) - Reading and appending participant rosters, exporting formed teams
//! - **Survey** ([`survey`]) - Personality questionnaire scoring and the game catalog

pub mod io;
pub mod models;
pub mod survey;
