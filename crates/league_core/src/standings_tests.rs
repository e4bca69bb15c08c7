use super::*;
use crate::outcome::{validate_submission, Metrics};
use crate::types::{SeasonId, Winner};
use chrono::Utc;

const SEASON: SeasonId = SeasonId::from_u128(100);

fn player(id: u128, name: &str) -> Participant {
    Participant {
        id: ParticipantId::from_u128(id),
        ..Participant::new(name, None)
    }
}

fn played(a: &Participant, b: &Participant, stars: (u8, u8), pct: (f64, f64), time: (f64, f64)) -> Fixture {
    let mut fixture = Fixture::new(SEASON, 1, a.id, b.id);
    let metrics = Metrics::complete(stars, pct, time);
    fixture.outcome = Some(validate_submission(&metrics, Utc::now()).unwrap());
    fixture
}

fn row<'a>(rows: &'a [StandingRow], p: &Participant) -> &'a StandingRow {
    rows.iter().find(|r| r.participant_id == p.id).unwrap()
}

#[test]
fn test_folding_with_unplayed_fixture() {
    let x = player(1, "X");
    let y = player(2, "Y");
    let z = player(3, "Z");

    let fixtures = vec![
        played(&x, &y, (3, 1), (100.0, 40.0), (120.0, 180.0)),
        played(&y, &z, (2, 0), (70.0, 20.0), (150.0, 180.0)),
        Fixture::new(SEASON, 3, z.id, x.id),
    ];
    let roster = vec![x.clone(), y.clone(), z.clone()];
    let rows = compute_standings(&fixtures, &roster);
    assert_eq!(rows.len(), 3);

    let rx = row(&rows, &x);
    assert_eq!((rx.points, rx.wins, rx.losses, rx.draws), (1, 1, 0, 0));
    assert_eq!(rx.star_diff, 2);
    assert_eq!(rx.matches_played, 1);

    let ry = row(&rows, &y);
    assert_eq!((ry.points, ry.wins, ry.losses), (1, 1, 1));
    assert_eq!(ry.star_diff, 0);
    assert_eq!((ry.stars_scored, ry.stars_conceded), (3, 3));
    assert_eq!(ry.matches_played, 2);

    let rz = row(&rows, &z);
    assert_eq!((rz.points, rz.wins, rz.losses), (0, 0, 1));
    assert_eq!(rz.star_diff, -2);
    assert_eq!(rz.matches_played, 1);

    // X and Y level on points, X ahead on differential
    let order: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["X", "Y", "Z"]);
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_rematch_counts_draw_without_points() {
    let a = player(1, "A");
    let b = player(2, "B");
    let fixtures = vec![played(&a, &b, (1, 1), (50.0, 50.0), (100.0, 100.0))];
    assert_eq!(fixtures[0].outcome.as_ref().unwrap().winner, Winner::DrawRematch);

    let rows = compute_standings(&fixtures, &[a.clone(), b.clone()]);
    for r in &rows {
        assert_eq!(r.points, 0);
        assert_eq!(r.draws, 1);
        assert_eq!(r.matches_played, 1);
        assert_eq!(r.star_diff, 0);
    }
}

#[test]
fn test_dense_ranks_when_points_tie() {
    let p: Vec<_> = (1..=4).map(|i| player(i, &format!("P{}", i))).collect();
    // Each wins exactly once, with different margins
    let fixtures = vec![
        played(&p[0], &p[1], (3, 0), (100.0, 10.0), (60.0, 180.0)),
        played(&p[1], &p[2], (2, 0), (80.0, 10.0), (60.0, 180.0)),
        played(&p[2], &p[3], (1, 0), (50.0, 10.0), (60.0, 180.0)),
        played(&p[3], &p[0], (1, 0), (40.0, 10.0), (60.0, 180.0)),
    ];
    let rows = compute_standings(&fixtures, &p);
    assert!(rows.iter().all(|r| r.points == 1));
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[test]
fn test_tie_break_order() {
    let a = player(1, "A");
    let b = player(2, "B");
    let c = player(3, "C");
    let d = player(4, "D");

    // Everyone draws: points and differential tie, percentage and time separate
    let fixtures = vec![
        played(&a, &b, (2, 2), (60.0, 60.0), (100.0, 100.0)),
        played(&c, &d, (2, 2), (90.0, 90.0), (200.0, 200.0)),
    ];
    let rows = compute_standings(&fixtures, &[a.clone(), b.clone(), c.clone(), d.clone()]);
    let order: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    // C and D lead on percentage, then ID breaks the exact tie
    assert_eq!(order, vec!["C", "D", "A", "B"]);

    // Same percentage, lower time ranks higher
    let fixtures = vec![
        played(&a, &b, (2, 2), (60.0, 60.0), (150.0, 150.0)),
        played(&c, &d, (2, 2), (60.0, 60.0), (90.0, 90.0)),
    ];
    let rows = compute_standings(&fixtures, &[a, b, c, d]);
    let order: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["C", "D", "A", "B"]);
}

#[test]
fn test_averages_are_rounded_means() {
    let a = player(1, "A");
    let b = player(2, "B");
    let c = player(3, "C");
    let fixtures = vec![
        played(&a, &b, (3, 1), (100.0, 33.333), (100.0, 10.0)),
        played(&a, &c, (2, 1), (66.0, 10.0), (150.5, 20.0)),
    ];
    let rows = compute_standings(&fixtures, &[a.clone(), b, c]);
    let ra = row(&rows, &a);
    assert_eq!(ra.avg_pct, 83.0);
    assert_eq!(ra.avg_time, 125.25);
    assert_eq!(ra.rank, 1);
}

#[test]
fn test_no_results_gives_zeroed_rows() {
    let a = player(1, "A");
    let b = player(2, "B");
    let fixtures = vec![Fixture::new(SEASON, 1, a.id, b.id)];
    let rows = compute_standings(&fixtures, &[a, b]);
    assert_eq!(rows.len(), 2);
    for r in &rows {
        assert_eq!(r.matches_played, 0);
        assert_eq!(r.avg_pct, 0.0);
        assert_eq!(r.avg_time, 0.0);
    }
}

#[test]
fn test_unknown_participant_gets_placeholder_name() {
    let a = player(1, "A");
    let ghost = player(9, "Ghost");
    let fixtures = vec![played(&a, &ghost, (1, 0), (30.0, 0.0), (10.0, 10.0))];
    let rows = compute_standings(&fixtures, &[a]);
    assert_eq!(rows[1].name, UNKNOWN_NAME);
}

#[test]
fn test_empty_season() {
    assert!(compute_standings(&[], &[]).is_empty());
}

#[test]
fn test_recompute_is_identical() {
    let p: Vec<_> = (1..=3).map(|i| player(i, &format!("P{}", i))).collect();
    let fixtures = vec![
        played(&p[0], &p[1], (1, 1), (50.0, 50.0), (100.0, 100.0)),
        played(&p[1], &p[2], (3, 2), (100.0, 90.0), (100.0, 120.0)),
    ];
    assert_eq!(compute_standings(&fixtures, &p), compute_standings(&fixtures, &p));
}
