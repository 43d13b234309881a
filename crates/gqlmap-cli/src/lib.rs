//! Command-line front end: loads a mapping manifest and answers type
//! resolution queries against it.

pub mod args;
pub mod driver;
pub mod manifest;
pub mod tracing_config;
