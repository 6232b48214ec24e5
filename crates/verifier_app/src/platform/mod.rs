mod app;
pub mod cli;
pub mod config;
mod effects;
pub mod logging;
pub mod ui;

pub use app::{run_app, Outcome};
pub use cli::{Cli, OutputFormat};
