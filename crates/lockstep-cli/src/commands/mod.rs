pub mod config;
pub mod resolve;

pub use config::{handle_config_command, ConfigCommand};
pub use resolve::handle_resolve_command;
