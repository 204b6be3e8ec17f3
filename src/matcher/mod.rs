// file: src/matcher/mod.rs
// description: fuzzy matching module exports
// reference: internal module structure

pub mod fuzzy;
pub mod patterns;
pub mod resolver;

pub use fuzzy::partial_ratio;
pub use patterns::{keywords, normalize_query};
pub use resolver::{LecturerResolver, RectorResolver};
