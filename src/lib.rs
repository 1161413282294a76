pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod platform;
pub mod session;
pub mod state;
pub mod tape;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
