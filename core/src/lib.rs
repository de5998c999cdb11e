// Core Gemini API functionality shared by the gateway and the workspace client

// Export client module - API client for Gemini
pub mod client;
pub use client::*;

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

// Export outcome module - Decoded generation results and idea splitting
pub mod outcome;
pub use outcome::{split_ideas, GenerationOutcome, IDEA_SEPARATOR};
