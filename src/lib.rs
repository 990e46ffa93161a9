pub mod app;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod report;
