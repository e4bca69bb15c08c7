//! Error kinds shared by the engine and the stores built on it

use thiserror::Error;

use crate::types::{FixtureId, ParticipantId, SeasonId};

pub type Result<T, E = LeagueError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum LeagueError {
    #[error("at least 2 participants are needed to build a schedule, got {found}")]
    InsufficientParticipants { found: usize },

    #[error("participant {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("fixtures were already generated for season {0}")]
    FixturesAlreadyExist(SeasonId),

    #[error("result is missing {metric}")]
    IncompleteMetrics { metric: &'static str },

    #[error("{metric} = {value} is out of range ({range})")]
    OutOfRangeMetric {
        metric: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("fixture {0} not found")]
    FixtureNotFound(FixtureId),

    #[error("season {0} not found")]
    SeasonNotFound(SeasonId),

    #[error("participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    #[error("participant {0} is inactive and cannot be scheduled")]
    InactiveParticipant(ParticipantId),

    #[error("no active season")]
    NoActiveSeason,

    // Raised by stores and config loaders built on this crate; the engine
    // itself never returns these.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage failure: {0}")]
    Storage(String),
}
