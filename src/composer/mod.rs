// file: src/composer/mod.rs
// description: response composition module exports
// reference: internal module structure

pub mod phrasing;
pub mod response;
pub mod template;

pub use phrasing::{FixedPhrasing, PhrasingStrategy, RandomPhrasing};
pub use response::ResponseComposer;
pub use template::ResponseTemplate;
