// Idea Workspace: prompt construction, gateway calls, and saved-ideas history

pub mod app;
pub mod cli;
pub mod config;
pub mod gateway_client;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod sequence;
pub mod workspace;
