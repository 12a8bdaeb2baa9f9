//! # Workflows Module
//!
//! High-level entry points that run a complete team formation: configuration checks, the
//! parallel search, numbering of the winning teams and statistics reporting.
//!
//! - **Formation Workflow** ([`form`]) - `form_teams`, `form_exact_teams`, the configurable
//!   `run` and the exact-request feasibility check.

pub mod form;
