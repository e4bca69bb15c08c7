//! Core engine for a round-robin league.
//!
//! Three pure components, leaves first:
//! - [`schedule`]: participant list -> rounds of pairings (circle method)
//! - [`outcome`]: two sides' raw metrics -> winner, rematch or undetermined
//! - [`standings`]: a season's fixtures -> ranked table
//!
//! Nothing in this crate performs I/O. Persistence and presentation live in
//! the `league` crate.

pub mod error;
pub mod history;
pub mod outcome;
pub mod schedule;
pub mod standings;
pub mod types;

pub use error::*;
pub use history::*;
pub use outcome::*;
pub use schedule::*;
pub use standings::*;
pub use types::*;
