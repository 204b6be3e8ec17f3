// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod lecturer;
pub mod match_result;
pub mod rector;

pub use lecturer::{LecturerDirectory, LecturerRecord};
pub use match_result::{MAX_SCORE, MatchResult, Resolution};
pub use rector::RectorRecord;
