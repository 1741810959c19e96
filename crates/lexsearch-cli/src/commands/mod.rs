//! CLI command implementations

pub mod analyze;
pub mod embed;
pub mod ruling;
pub mod search;
pub mod status;
pub mod tags;
