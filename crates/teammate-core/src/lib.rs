//! # TeamMate Core Library
//!
//! Balanced team formation for gaming clubs. A roster of participants is partitioned into
//! small teams that respect hard and soft constraints (skill balance, game variety, role
//! diversity, personality composition) by running several randomized greedy constructions
//! in parallel and keeping the best partition according to a weighted quality score.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable participant records, teams and partitions,
//!   roster/team file I/O, roster statistics and the personality survey.
//!
//! - **[`engine`]: The Logic Core.** Formation configuration, the greedy team builder,
//!   candidate fit and partition quality scoring, candidate selection and the parallel
//!   search coordinator with its deadline and cancellation handling.
//!
//! - **[`workflows`]: The Public API.** Ties the engine together into complete formation
//!   runs (`form_teams`, `form_exact_teams`), numbering the winning teams and reporting
//!   statistics.

pub mod core;
pub mod engine;
pub mod workflows;
