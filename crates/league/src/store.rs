//! League data storage

use league_core::{
    Fixture, FixtureId, LeagueError, OutcomeRecord, Participant, ParticipantId, Result, Season,
    SeasonId,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever the on-disk layout changes
pub const DATA_VERSION: u32 = 1;

/// Persistence operations the league service relies on.
///
/// Implementations only store and retrieve. The one rule they enforce is
/// that fixtures are created once per season.
pub trait LeagueStore {
    fn insert_participant(&mut self, participant: Participant) -> Result<()>;

    fn participant(&self, id: ParticipantId) -> Result<Participant>;

    /// Replace a stored participant with the same ID.
    fn update_participant(&mut self, participant: Participant) -> Result<()>;

    fn list_participants(&self, active_only: bool) -> Result<Vec<Participant>>;

    /// Store a season. If it is active, every other season is deactivated.
    fn insert_season(&mut self, season: Season) -> Result<()>;

    fn season(&self, id: SeasonId) -> Result<Season>;

    fn list_seasons(&self) -> Result<Vec<Season>>;

    /// Store a season's schedule. Fails with `FixturesAlreadyExist` if the
    /// season already has fixtures.
    fn create_fixtures(&mut self, season_id: SeasonId, fixtures: Vec<Fixture>) -> Result<()>;

    fn list_fixtures(&self, season_id: SeasonId) -> Result<Vec<Fixture>>;

    fn fixture(&self, id: FixtureId) -> Result<Fixture>;

    /// Overwrite a fixture's outcome record.
    fn update_fixture_outcome(&mut self, fixture_id: FixtureId, outcome: OutcomeRecord) -> Result<()>;
}

/// Everything the league stores, as one serializable value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueData {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

impl LeagueData {
    pub fn new() -> Self {
        Self {
            version: DATA_VERSION,
            ..Default::default()
        }
    }

    /// Load league data from a JSON file. A missing file is an empty league.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no league data yet, starting empty");
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LeagueError::Storage(format!("failed to read {}: {}", path.display(), e)))?;
        let data: Self = serde_json::from_str(&contents)
            .map_err(|e| LeagueError::Storage(format!("failed to parse {}: {}", path.display(), e)))?;
        if data.version > DATA_VERSION {
            return Err(LeagueError::Storage(format!(
                "{} was written by a newer version (data version {})",
                path.display(),
                data.version
            )));
        }
        tracing::debug!(
            path = %path.display(),
            participants = data.participants.len(),
            seasons = data.seasons.len(),
            fixtures = data.fixtures.len(),
            "loaded league data"
        );
        Ok(data)
    }

    /// Save league data as pretty JSON. Writes a temporary file first and
    /// renames it over the target.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| LeagueError::Storage(format!("failed to create {}: {}", dir.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LeagueError::Storage(format!("failed to serialize: {}", e)))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| LeagueError::Storage(format!("failed to write {}: {}", tmp.display(), e)))?;
        std::fs::rename(&tmp, path)
            .map_err(|e| LeagueError::Storage(format!("failed to replace {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "saved league data");
        Ok(())
    }
}

/// In-memory store over [`LeagueData`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: LeagueData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_data(LeagueData::new())
    }

    pub fn from_data(data: LeagueData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &LeagueData {
        &self.data
    }

    pub fn into_data(self) -> LeagueData {
        self.data
    }
}

impl LeagueStore for MemoryStore {
    fn insert_participant(&mut self, participant: Participant) -> Result<()> {
        self.data.participants.push(participant);
        Ok(())
    }

    fn participant(&self, id: ParticipantId) -> Result<Participant> {
        self.data
            .participants
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(LeagueError::ParticipantNotFound(id))
    }

    fn update_participant(&mut self, participant: Participant) -> Result<()> {
        let slot = self
            .data
            .participants
            .iter_mut()
            .find(|p| p.id == participant.id)
            .ok_or(LeagueError::ParticipantNotFound(participant.id))?;
        *slot = participant;
        Ok(())
    }

    fn list_participants(&self, active_only: bool) -> Result<Vec<Participant>> {
        Ok(self
            .data
            .participants
            .iter()
            .filter(|p| p.active || !active_only)
            .cloned()
            .collect())
    }

    fn insert_season(&mut self, season: Season) -> Result<()> {
        if season.active {
            for other in self.data.seasons.iter_mut() {
                other.active = false;
            }
        }
        self.data.seasons.push(season);
        Ok(())
    }

    fn season(&self, id: SeasonId) -> Result<Season> {
        self.data
            .seasons
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(LeagueError::SeasonNotFound(id))
    }

    fn list_seasons(&self) -> Result<Vec<Season>> {
        Ok(self.data.seasons.clone())
    }

    fn create_fixtures(&mut self, season_id: SeasonId, fixtures: Vec<Fixture>) -> Result<()> {
        if self.data.fixtures.iter().any(|f| f.season_id == season_id) {
            return Err(LeagueError::FixturesAlreadyExist(season_id));
        }
        self.data.fixtures.extend(fixtures);
        Ok(())
    }

    fn list_fixtures(&self, season_id: SeasonId) -> Result<Vec<Fixture>> {
        Ok(self
            .data
            .fixtures
            .iter()
            .filter(|f| f.season_id == season_id)
            .cloned()
            .collect())
    }

    fn fixture(&self, id: FixtureId) -> Result<Fixture> {
        self.data
            .fixtures
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(LeagueError::FixtureNotFound(id))
    }

    fn update_fixture_outcome(&mut self, fixture_id: FixtureId, outcome: OutcomeRecord) -> Result<()> {
        let fixture = self
            .data
            .fixtures
            .iter_mut()
            .find(|f| f.id == fixture_id)
            .ok_or(LeagueError::FixtureNotFound(fixture_id))?;
        fixture.outcome = Some(outcome);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
