//! Configuration system for Relief.
//!
//! Generation parameters, output locations and logging settings persist to disk
//! as RON and are read once per run. Supports CLI overrides via clap and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, OutputConfig};
pub use error::ConfigError;
