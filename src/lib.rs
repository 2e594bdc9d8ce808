pub mod cli;
pub mod config;
pub mod export;
pub mod input;
pub mod logger;
pub mod lookup;
pub mod pipeline;
pub mod record;
pub mod session;

pub use record::{LookupOutcome, LookupRecord, OutcomeKind};
