pub mod participant;
pub mod partition;
pub mod statistics;
pub mod team;
