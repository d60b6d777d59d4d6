pub mod client;
pub mod cmd;
pub mod config;
pub mod dumpsys;
pub mod input;
pub mod ps;
