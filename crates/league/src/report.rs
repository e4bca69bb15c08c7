//! Plain-text reports

use league_core::{Fixture, Participant, ParticipantId, Season, StandingRow, Winner};
use std::collections::HashMap;

use crate::service::Round;

/// Looks up display names for fixture sides
pub struct NameBook {
    names: HashMap<ParticipantId, String>,
}

impl NameBook {
    pub fn new(participants: &[Participant]) -> Self {
        Self {
            names: participants.iter().map(|p| (p.id, p.name.clone())).collect(),
        }
    }

    pub fn name(&self, id: ParticipantId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or("N/A")
    }
}

/// Generate the standings table
pub fn standings_report(title: &str, season: &Season, rows: &[StandingRow]) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {}: {} ===\n\n", title, season.name));

    if rows.is_empty() {
        report.push_str("No fixtures yet.\n");
        return report;
    }

    report.push_str(&format!(
        "{:>3} {:<20} {:>4} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>5} {:>7} {:>8}\n",
        "#", "Player", "Pts", "P", "W", "L", "D", "S+", "S-", "Diff", "Avg %", "Avg s"
    ));
    report.push_str(&"-".repeat(80));
    report.push('\n');

    for row in rows {
        report.push_str(&format!(
            "{:>3} {:<20} {:>4} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>+5} {:>7.2} {:>8.2}\n",
            row.rank,
            truncate(&row.name, 20),
            row.points,
            row.matches_played,
            row.wins,
            row.losses,
            row.draws,
            row.stars_scored,
            row.stars_conceded,
            row.star_diff,
            row.avg_pct,
            row.avg_time
        ));
    }

    report
}

/// Generate the fixture list, one block per round
pub fn rounds_report(season: &Season, rounds: &[Round], names: &NameBook) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Rounds: {} ===\n", season.name));

    if rounds.is_empty() {
        report.push_str("\nNo fixtures generated.\n");
        return report;
    }

    for round in rounds {
        let played = round.fixtures.iter().filter(|f| f.is_played()).count();
        report.push_str(&format!(
            "\nRound {} ({}/{} played)\n",
            round.number,
            played,
            round.fixtures.len()
        ));
        for fixture in &round.fixtures {
            report.push_str(&fixture_line(fixture, names));
        }
    }

    report
}

/// Generate one participant's fixtures for a season
pub fn history_report(participant: &Participant, fixtures: &[Fixture], names: &NameBook) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== History: {} ===\n\n", participant.name));
    if fixtures.is_empty() {
        report.push_str("No fixtures.\n");
        return report;
    }
    for fixture in fixtures {
        let opponent = fixture
            .opponent_of(participant.id)
            .map(|id| names.name(id))
            .unwrap_or("N/A");
        report.push_str(&format!("R{:<3} vs {:<16}", fixture.round, truncate(opponent, 16)));
        report.push_str(&fixture_line(fixture, names));
    }
    report
}

pub fn participants_report(participants: &[Participant]) -> String {
    let mut report = String::new();
    report.push_str(&format!("{:<10} {:<20} {:<12} {}\n", "ID", "Name", "Tag", "Status"));
    report.push_str(&"-".repeat(52));
    report.push('\n');
    for p in participants {
        report.push_str(&format!(
            "{:<10} {:<20} {:<12} {}\n",
            p.id.short(),
            truncate(&p.name, 20),
            p.tag.as_deref().unwrap_or("-"),
            if p.active { "active" } else { "inactive" }
        ));
    }
    report
}

pub fn seasons_report(seasons: &[Season]) -> String {
    let mut report = String::new();
    for s in seasons {
        report.push_str(&format!(
            "{:<10} {:<30} {} {}\n",
            s.id.short(),
            truncate(&s.name, 30),
            s.created_at.format("%Y-%m-%d"),
            if s.active { "(active)" } else { "" }
        ));
    }
    report
}

fn fixture_line(fixture: &Fixture, names: &NameBook) -> String {
    let a = names.name(fixture.side_a);
    let b = names.name(fixture.side_b);
    match &fixture.outcome {
        None => format!("  [{}] {} vs {}: pending\n", fixture.id.short(), a, b),
        Some(r) => {
            let verdict = match r.winner {
                Winner::A => format!("{} wins", a),
                Winner::B => format!("{} wins", b),
                Winner::DrawRematch => "exact tie, rematch".to_string(),
                Winner::Unset => "undecided".to_string(),
            };
            format!(
                "  [{}] {} vs {}: {}*-{}* {:.1}%-{:.1}% {:.0}s-{:.0}s, {}\n",
                fixture.id.short(),
                a,
                b,
                r.stars_a,
                r.stars_b,
                r.pct_a,
                r.pct_b,
                r.time_a,
                r.time_b,
                verdict
            )
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('~');
        out
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
