pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod stats;
pub mod utils;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
