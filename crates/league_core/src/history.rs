//! Read-only views over a season's fixtures

use crate::types::{Fixture, ParticipantId};

/// Fixtures grouped by round, rounds ascending. Within a round fixtures keep
/// a stable order by ID.
pub fn group_by_round(fixtures: &[Fixture]) -> Vec<(u32, Vec<&Fixture>)> {
    let mut sorted: Vec<&Fixture> = fixtures.iter().collect();
    sorted.sort_by_key(|f| (f.round, f.id));

    let mut rounds: Vec<(u32, Vec<&Fixture>)> = Vec::new();
    for fixture in sorted {
        if let Some((round, list)) = rounds.last_mut() {
            if *round == fixture.round {
                list.push(fixture);
                continue;
            }
        }
        rounds.push((fixture.round, vec![fixture]));
    }
    rounds
}

/// Every fixture `participant` takes part in, in round order.
pub fn participant_history(fixtures: &[Fixture], participant: ParticipantId) -> Vec<&Fixture> {
    let mut history: Vec<&Fixture> = fixtures.iter().filter(|f| f.involves(participant)).collect();
    history.sort_by_key(|f| (f.round, f.id));
    history
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
