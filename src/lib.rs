//! Ticker Research - investment research reports driven through a hosted agent
//!
//! The agent runtime is reached through its CLI in stream-json mode. This
//! crate builds the prompts and options for a research run, streams the
//! runtime's messages, and prints progress as they arrive. Searching the
//! web and writing the report are left to the agent's own tools.

mod config;
pub mod core;
pub mod error;
pub mod research;
pub mod utils;

pub mod cli;

pub use crate::config::Settings;
pub use crate::core::{AgentClient, QueryOptions, SdkMessage};
pub use crate::error::{ResearchError, Result};
