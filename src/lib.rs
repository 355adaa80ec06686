// Library surface for headless/integration tests and reuse.
// main.rs only owns the CLI and the terminal.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod timer;
pub mod ui;
pub mod words;

pub use error::{Error, Result};
