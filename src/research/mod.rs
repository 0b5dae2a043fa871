//! Investment research runs on top of the agent client
//!
//! A run is a ticker, a mode (single agent or orchestrated researchers),
//! and the query options those imply. Progress is printed per message as
//! the agent works; the agent itself writes the report file.

pub mod log;
pub mod plan;
pub mod prompts;
pub mod runner;
pub mod summary;
pub mod ticker;

pub use plan::{ResearchMode, ResearchOverrides, ResearchPlan};
pub use runner::{ResearchOutcome, ResearchRunner};
pub use ticker::Ticker;
