//! Generated movie synopses and analyses via the Gemini API.
//!
//! Documents are streamed over SSE and collected; the prompt template
//! decides whether the result is plain text or the sectioned layout the
//! analysis extractor understands.

pub mod config;
pub mod prompts;
pub mod providers;
pub mod types;

pub use config::GeminiConfig;
pub use prompts::PromptTemplate;
pub use types::*;
