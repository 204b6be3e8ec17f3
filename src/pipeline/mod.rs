// file: src/pipeline/mod.rs
// description: question resolution pipeline exports
// reference: pipeline orchestration

pub mod access;
pub mod resolution;
pub mod stats;

pub use access::HumanVerified;
pub use resolution::{
    Answer, AnswerSource, LECTURER_UNAVAILABLE_MESSAGE, RECTOR_UNAVAILABLE_MESSAGE,
    ResolutionRouter,
};
pub use stats::{DailyCount, QuestionCounter};
