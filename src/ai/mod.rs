// file: src/ai/mod.rs
// description: AI fallback module exports
// reference: internal module structure

pub mod client;
pub mod context;
pub mod fallback;

pub use client::{ChatCompletionClient, CompletionClient};
pub use context::ContextBuilder;
pub use fallback::{APOLOGY_MESSAGE, FallbackResponder, SERVICE_UNAVAILABLE_MESSAGE};
