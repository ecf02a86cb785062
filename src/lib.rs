//! Helpers for the software capitalization process: the epic completion
//! report, the roster export, and a chat credentials smoke test.

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod ext;
pub mod pipeline;
pub mod progress;
pub mod query;
pub mod render;
pub mod roster;
pub mod telemetry;
pub mod tracker;
pub mod util;
pub mod window;
