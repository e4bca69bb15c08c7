use super::*;
use crate::schedule::round_robin;
use crate::types::SeasonId;

fn season_fixtures(n: u128) -> (Vec<ParticipantId>, Vec<Fixture>) {
    let ids: Vec<_> = (1..=n).map(ParticipantId::from_u128).collect();
    let fixtures = round_robin(&ids)
        .unwrap()
        .into_fixtures(SeasonId::from_u128(1));
    (ids, fixtures)
}

#[test]
fn test_group_by_round() {
    let (_, mut fixtures) = season_fixtures(6);
    fixtures.reverse();

    let rounds = group_by_round(&fixtures);
    assert_eq!(rounds.len(), 5);
    for (idx, (round, list)) in rounds.iter().enumerate() {
        assert_eq!(*round as usize, idx + 1);
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|f| f.round == *round));
        assert!(list.windows(2).all(|w| w[0].id < w[1].id));
    }
}

#[test]
fn test_participant_history() {
    let (ids, fixtures) = season_fixtures(5);
    let history = participant_history(&fixtures, ids[2]);

    assert_eq!(history.len(), 4);
    assert!(history.iter().all(|f| f.involves(ids[2])));
    assert!(history.windows(2).all(|w| w[0].round < w[1].round));

    let mut opponents: Vec<_> = history.iter().filter_map(|f| f.opponent_of(ids[2])).collect();
    opponents.sort();
    assert_eq!(opponents, vec![ids[0], ids[1], ids[3], ids[4]]);
}

#[test]
fn test_history_of_unknown_participant_is_empty() {
    let (_, fixtures) = season_fixtures(4);
    assert!(participant_history(&fixtures, ParticipantId::from_u128(99)).is_empty());
}
