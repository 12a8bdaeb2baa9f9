//! # Engine Module
//!
//! The optimization engine behind team formation. It turns a participant pool into
//! candidate partitions, scores them and keeps the best one.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Team size, team count, fan-out, deadline, seed and team
//!   acceptance policy
//! - **Tasks** ([`tasks`]) - Candidate fit scoring, greedy team construction and partition
//!   quality scoring
//! - **Selection** ([`selection`]) - Choosing the winning partition among scored candidates
//! - **Search** ([`search`]) - Running several construction attempts in parallel under a
//!   deadline
//! - **Progress Monitoring** ([`progress`]) - Injected progress callbacks for front ends
//! - **Cancellation** ([`cancellation`]) - Cooperative stop signal for abandoned attempts
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod cancellation;
pub mod config;
pub mod error;
pub mod progress;
pub mod search;
pub mod selection;
pub mod tasks;
