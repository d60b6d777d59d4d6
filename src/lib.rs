pub mod cli;
pub mod core;

pub use anyhow::{Context, Result};

pub use crate::core::client::AdbClient;
pub use crate::core::config::Settings;
