pub mod commands;
pub mod config;
pub mod state;

pub use commands::{run, Command, CommandError};
pub use config::{Config, ConfigError};
pub use state::AppState;
