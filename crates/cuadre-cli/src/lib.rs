//! CLI library components for the billing report generator.

pub mod commands;
pub mod logging;
pub mod source;
pub mod types;
