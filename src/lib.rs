pub mod assessment;
pub mod config;
pub mod logging;
pub mod output;
pub mod questions;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
pub mod wizard;
