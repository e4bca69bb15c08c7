//! League runner built on `league_core`
//!
//! This crate provides:
//! - A store abstraction plus a JSON file-backed implementation
//! - The `League` service: roster, seasons, scheduling, results, standings
//! - Plain-text reports for the command line
//!
//! # Usage
//!
//! ```bash
//! # Register players and open a season
//! cargo run -p league -- player add "Alice" --tag "#ALC"
//! cargo run -p league -- season create "Season 1"
//!
//! # Generate the round-robin and record a result
//! cargo run -p league -- schedule
//! cargo run -p league -- result <fixture> 3 2 100 85.5 120 140
//! cargo run -p league -- standings
//! ```

mod config;
mod report;
mod service;
mod store;

pub use config::*;
pub use report::*;
pub use service::*;
pub use store::*;
