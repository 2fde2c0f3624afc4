use clap::ValueEnum;

mod config_cmd;
mod replay;

pub use config_cmd::ConfigCommand;
pub use replay::ReplayCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
