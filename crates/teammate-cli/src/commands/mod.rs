pub mod form;
pub mod register;
pub mod stats;
