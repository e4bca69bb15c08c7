//! League service: the entry points a front end calls.
//!
//! The service owns a store and composes it with the pure engine in
//! `league_core`. It holds no other state; every standings query reloads
//! the fixtures and recomputes from scratch.

use chrono::Utc;
use league_core::{
    compute_standings, group_by_round, participant_history, resolve_outcome, round_robin,
    shuffled_roster, validate_submission, Fixture, FixtureId, LeagueError, Metrics, Outcome,
    Participant, ParticipantId, Result, Season, SeasonId, StandingRow,
};

use crate::store::LeagueStore;

/// One round of a season, fixtures in stable order
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub number: u32,
    pub fixtures: Vec<Fixture>,
}

pub struct League<S> {
    store: S,
}

impl<S: LeagueStore> League<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ---------------------------------------------------------------------
    // Roster
    // ---------------------------------------------------------------------

    pub fn add_participant(&mut self, name: &str, tag: Option<&str>) -> Result<Participant> {
        let participant = Participant::new(name.trim(), tag.map(str::trim));
        self.store.insert_participant(participant.clone())?;
        tracing::info!(id = %participant.id, name = %participant.name, "participant added");
        Ok(participant)
    }

    pub fn rename_participant(
        &mut self,
        id: ParticipantId,
        name: &str,
        tag: Option<&str>,
    ) -> Result<Participant> {
        let mut participant = self.store.participant(id)?;
        participant.name = name.trim().to_string();
        participant.tag = tag.map(|t| t.trim().to_string());
        self.store.update_participant(participant.clone())?;
        tracing::info!(%id, name = %participant.name, "participant renamed");
        Ok(participant)
    }

    /// Soft delete: the participant keeps their fixtures but is left out of
    /// future schedules.
    pub fn deactivate_participant(&mut self, id: ParticipantId) -> Result<Participant> {
        let mut participant = self.store.participant(id)?;
        participant.active = false;
        self.store.update_participant(participant.clone())?;
        tracing::info!(%id, "participant deactivated");
        Ok(participant)
    }

    pub fn participants(&self, active_only: bool) -> Result<Vec<Participant>> {
        self.store.list_participants(active_only)
    }

    // ---------------------------------------------------------------------
    // Seasons
    // ---------------------------------------------------------------------

    /// Open a new season. It becomes the only active one.
    pub fn create_season(&mut self, name: &str) -> Result<Season> {
        let season = Season::new(name.trim());
        self.store.insert_season(season.clone())?;
        tracing::info!(id = %season.id, name = %season.name, "season created");
        Ok(season)
    }

    /// All seasons, newest first.
    pub fn seasons(&self) -> Result<Vec<Season>> {
        let mut seasons = self.store.list_seasons()?;
        // Stores list in insertion order; reverse first so equal timestamps
        // still come out newest first
        seasons.reverse();
        seasons.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(seasons)
    }

    pub fn active_season(&self) -> Result<Season> {
        self.store
            .list_seasons()?
            .into_iter()
            .find(|s| s.active)
            .ok_or(LeagueError::NoActiveSeason)
    }

    // ---------------------------------------------------------------------
    // Scheduling
    // ---------------------------------------------------------------------

    /// Generate and store the round-robin for `season_id`.
    ///
    /// Every participant must be on the roster and active.
    ///
    /// The existing-fixtures check is a plain read before the write; callers
    /// that can race must serialize generation per season themselves.
    pub fn generate_schedule(
        &mut self,
        season_id: SeasonId,
        participant_ids: &[ParticipantId],
    ) -> Result<Vec<Fixture>> {
        self.store.season(season_id)?;

        if !self.store.list_fixtures(season_id)?.is_empty() {
            tracing::warn!(season = %season_id, "fixtures already exist, not regenerating");
            return Err(LeagueError::FixturesAlreadyExist(season_id));
        }

        let roster = self.store.list_participants(false)?;
        for id in participant_ids {
            match roster.iter().find(|p| p.id == *id) {
                None => {
                    tracing::warn!(season = %season_id, participant = %id, "unknown participant");
                    return Err(LeagueError::ParticipantNotFound(*id));
                }
                Some(p) if !p.active => {
                    tracing::warn!(season = %season_id, participant = %id, "participant is inactive");
                    return Err(LeagueError::InactiveParticipant(*id));
                }
                Some(_) => {}
            }
        }

        let schedule = round_robin(participant_ids).inspect_err(|e| {
            tracing::warn!(season = %season_id, error = %e, "schedule rejected");
        })?;
        let rounds = schedule.round_count();
        let fixtures = schedule.into_fixtures(season_id);

        self.store.create_fixtures(season_id, fixtures.clone())?;
        tracing::info!(
            season = %season_id,
            participants = participant_ids.len(),
            fixtures = fixtures.len(),
            rounds,
            "schedule generated"
        );
        Ok(fixtures)
    }

    /// Schedule every active participant, in registration order or shuffled
    /// with `shuffle_seed`.
    pub fn generate_schedule_for_active_roster(
        &mut self,
        season_id: SeasonId,
        shuffle_seed: Option<u64>,
    ) -> Result<Vec<Fixture>> {
        let ids: Vec<ParticipantId> = self
            .store
            .list_participants(true)?
            .iter()
            .map(|p| p.id)
            .collect();
        let ids = match shuffle_seed {
            Some(seed) => shuffled_roster(&ids, seed),
            None => ids,
        };
        self.generate_schedule(season_id, &ids)
    }

    pub fn fixtures(&self, season_id: SeasonId) -> Result<Vec<Fixture>> {
        self.store.list_fixtures(season_id)
    }

    pub fn rounds(&self, season_id: SeasonId) -> Result<Vec<Round>> {
        let fixtures = self.store.list_fixtures(season_id)?;
        Ok(group_by_round(&fixtures)
            .into_iter()
            .map(|(number, list)| Round {
                number,
                fixtures: list.into_iter().cloned().collect(),
            })
            .collect())
    }

    // ---------------------------------------------------------------------
    // Results
    // ---------------------------------------------------------------------

    /// Decide a match from raw metrics without storing anything.
    pub fn resolve_outcome(&self, metrics: &Metrics) -> Outcome {
        resolve_outcome(metrics)
    }

    /// Validate, resolve and store a result. Submitting again for the same
    /// fixture replaces the earlier record.
    pub fn submit_result(&mut self, fixture_id: FixtureId, metrics: &Metrics) -> Result<Outcome> {
        let fixture = self.store.fixture(fixture_id)?;
        let record = validate_submission(metrics, Utc::now()).inspect_err(|e| {
            tracing::warn!(fixture = %fixture_id, error = %e, "result rejected");
        })?;
        let outcome = resolve_outcome(&record.metrics());
        let replaced = fixture.is_played();

        self.store.update_fixture_outcome(fixture_id, record)?;

        match outcome {
            Outcome::DrawRematch => {
                tracing::info!(fixture = %fixture_id, round = fixture.round, "exact tie, rematch required")
            }
            _ => tracing::info!(
                fixture = %fixture_id,
                round = fixture.round,
                ?outcome,
                replaced,
                "result recorded"
            ),
        }
        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Standings
    // ---------------------------------------------------------------------

    pub fn compute_standings(&self, season_id: SeasonId) -> Result<Vec<StandingRow>> {
        let fixtures = self.store.list_fixtures(season_id)?;
        let roster = self.store.list_participants(false)?;
        Ok(compute_standings(&fixtures, &roster))
    }

    pub fn participant_history(
        &self,
        season_id: SeasonId,
        participant_id: ParticipantId,
    ) -> Result<Vec<Fixture>> {
        self.store.participant(participant_id)?;
        let fixtures = self.store.list_fixtures(season_id)?;
        Ok(participant_history(&fixtures, participant_id)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
