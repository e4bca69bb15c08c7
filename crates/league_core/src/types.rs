//! Records shared by the scheduler, the resolver and the standings table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::outcome::{Metrics, Outcome};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// First eight hex digits, enough to tell rows apart in a table.
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Opaque participant identity.
    ParticipantId
);
define_id!(
    /// Opaque season identity.
    SeasonId
);
define_id!(
    /// Opaque fixture identity.
    FixtureId
);

/// A league member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name
    pub name: String,
    /// In-game handle, if known
    #[serde(default)]
    pub tag: Option<String>,
    /// Inactive participants keep their history but are never scheduled again
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: &str, tag: Option<&str>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.to_string(),
            tag: tag.map(str::to_string),
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// A season groups one complete round-robin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    /// At most one season is active at a time
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Season {
    pub fn new(name: &str) -> Self {
        Self {
            id: SeasonId::new(),
            name: name.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Winner as stored on an outcome record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    A,
    B,
    DrawRematch,
    Unset,
}

impl From<Outcome> for Winner {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::A => Winner::A,
            Outcome::B => Winner::B,
            Outcome::DrawRematch => Winner::DrawRematch,
            Outcome::Undetermined => Winner::Unset,
        }
    }
}

/// Raw metrics and derived winner of a played fixture.
///
/// Every field is always present: a fixture either has a full record or none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub stars_a: u8,
    pub stars_b: u8,
    pub pct_a: f64,
    pub pct_b: f64,
    pub time_a: f64,
    pub time_b: f64,
    pub winner: Winner,
    pub recorded_at: DateTime<Utc>,
}

impl OutcomeRecord {
    /// The stored values as resolver input.
    pub fn metrics(&self) -> Metrics {
        Metrics {
            stars_a: Some(self.stars_a),
            stars_b: Some(self.stars_b),
            pct_a: Some(self.pct_a),
            pct_b: Some(self.pct_b),
            time_a: Some(self.time_a),
            time_b: Some(self.time_b),
        }
    }
}

/// One scheduled match between two participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub season_id: SeasonId,
    /// 1-based round number
    pub round: u32,
    pub side_a: ParticipantId,
    pub side_b: ParticipantId,
    #[serde(default)]
    pub outcome: Option<OutcomeRecord>,
}

impl Fixture {
    pub fn new(season_id: SeasonId, round: u32, side_a: ParticipantId, side_b: ParticipantId) -> Self {
        Self {
            id: FixtureId::new(),
            season_id,
            round,
            side_a,
            side_b,
            outcome: None,
        }
    }

    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.side_a == participant || self.side_b == participant
    }

    pub fn is_played(&self) -> bool {
        self.outcome.is_some()
    }

    /// The other side of the fixture, if `participant` plays in it.
    pub fn opponent_of(&self, participant: ParticipantId) -> Option<ParticipantId> {
        if self.side_a == participant {
            Some(self.side_b)
        } else if self.side_b == participant {
            Some(self.side_a)
        } else {
            None
        }
    }
}
