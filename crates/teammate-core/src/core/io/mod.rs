//! Reading and writing the club's CSV files.
//!
//! Participant rosters are read with [`roster::read_participants`] and extended one record
//! at a time with [`roster::append_participant`]. Formed teams are exported with
//! [`teams::write_teams`].

pub mod roster;
pub mod teams;
