//! League CLI
//!
//! Manage the roster and seasons, generate the round-robin, record results
//! and print standings. Everything is kept in one JSON data file.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use league::{
    history_report, participants_report, rounds_report, seasons_report, standings_report,
    League, LeagueConfig, LeagueData, LeagueStore, MemoryStore, NameBook,
};
use league_core::{LeagueError, Metrics, Outcome, Participant, Season};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Round-robin league: fixtures, results and standings", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "league.toml")]
    config: PathBuf,

    /// Override the data file from the config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roster management
    Player {
        #[command(subcommand)]
        action: PlayerCommands,
    },
    /// Season management
    Season {
        #[command(subcommand)]
        action: SeasonCommands,
    },
    /// Generate the round-robin for a season from the active roster
    Schedule {
        /// Season ID or prefix (default: active season)
        #[arg(long)]
        season: Option<String>,
        /// Shuffle the roster with this seed before scheduling
        #[arg(long)]
        shuffle: Option<u64>,
    },
    /// List fixtures round by round
    Rounds {
        #[arg(long)]
        season: Option<String>,
    },
    /// Record a result: stars, attack percentage and time (seconds) for both sides
    #[command(name = "result")]
    Record {
        /// Fixture ID or prefix
        fixture: String,
        stars_a: u8,
        stars_b: u8,
        pct_a: f64,
        pct_b: f64,
        time_a: f64,
        time_b: f64,
    },
    /// Print the standings table
    Standings {
        #[arg(long)]
        season: Option<String>,
        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one participant's fixtures
    History {
        /// Participant ID or prefix
        participant: String,
        #[arg(long)]
        season: Option<String>,
    },
    /// Write a default config file
    Init,
}

#[derive(Subcommand)]
enum PlayerCommands {
    /// Register a participant
    Add {
        name: String,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Change a participant's name and tag
    Rename {
        participant: String,
        name: String,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Deactivate a participant; history is kept
    Remove { participant: String },
    /// List participants
    List {
        /// Include inactive participants
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum SeasonCommands {
    /// Open a new season and make it the active one
    Create { name: String },
    /// List seasons, newest first
    List,
}

fn main() {
    let cli = Cli::parse();

    let config = match LeagueConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let default_filter = if cli.verbose { "debug" } else { config.log_filter.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: LeagueConfig) -> Result<()> {
    if let Commands::Init = cli.command {
        return commands::init(&cli.config, &config);
    }

    let data_file = cli.data.clone().unwrap_or_else(|| config.data_file.clone());
    let data = LeagueData::load(&data_file)
        .with_context(|| format!("loading {}", data_file.display()))?;
    let mut league = League::new(MemoryStore::from_data(data));

    let dirty = match cli.command {
        Commands::Player { action } => commands::player(&mut league, action)?,
        Commands::Season { action } => commands::season(&mut league, action)?,
        Commands::Schedule { season, shuffle } => commands::schedule(&mut league, season, shuffle)?,
        Commands::Rounds { season } => commands::rounds(&league, season)?,
        Commands::Record {
            fixture,
            stars_a,
            stars_b,
            pct_a,
            pct_b,
            time_a,
            time_b,
        } => {
            let metrics = Metrics::complete((stars_a, stars_b), (pct_a, pct_b), (time_a, time_b));
            commands::result(&mut league, &fixture, &metrics)?
        }
        Commands::Standings { season, json } => commands::standings(&league, &config, season, json)?,
        Commands::History {
            participant,
            season,
        } => commands::history(&league, &participant, season)?,
        Commands::Init => unreachable!("handled above"),
    };

    if dirty {
        league
            .into_store()
            .into_data()
            .save(&data_file)
            .with_context(|| format!("saving {}", data_file.display()))?;
    }
    Ok(())
}

/// Resolve a user-typed ID prefix against candidates.
fn pick<'a, T>(
    what: &str,
    prefix: &str,
    items: &'a [T],
    id_of: impl Fn(&T) -> String,
) -> Result<&'a T> {
    let prefix = prefix.trim().to_lowercase().replace('-', "");
    if prefix.is_empty() {
        bail!("empty {} id", what);
    }
    let matches: Vec<&T> = items
        .iter()
        .filter(|item| id_of(*item).replace('-', "").starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [one] => Ok(*one),
        [] => bail!("no {} matches '{}'", what, prefix),
        _ => bail!("'{}' matches {} {}s, use a longer prefix", prefix, matches.len(), what),
    }
}

mod commands {
    use super::*;

    type CliLeague = League<MemoryStore>;

    fn season_for(league: &CliLeague, season: Option<String>) -> Result<Season> {
        match season {
            Some(prefix) => {
                let seasons = league.seasons()?;
                Ok(pick("season", &prefix, &seasons, |s| s.id.to_string())?.clone())
            }
            None => Ok(league.active_season()?),
        }
    }

    fn participant_for(league: &CliLeague, prefix: &str) -> Result<Participant> {
        let participants = league.participants(false)?;
        Ok(pick("participant", prefix, &participants, |p| p.id.to_string())?.clone())
    }

    pub fn init(path: &Path, config: &LeagueConfig) -> Result<()> {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        std::fs::write(path, config.to_toml()?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Created config at {}", path.display());
        Ok(())
    }

    pub fn player(league: &mut CliLeague, action: PlayerCommands) -> Result<bool> {
        match action {
            PlayerCommands::Add { name, tag } => {
                if name.trim().is_empty() {
                    bail!("participant name cannot be empty");
                }
                let p = league.add_participant(&name, tag.as_deref())?;
                println!("Added {} ({})", p.name, p.id.short());
                Ok(true)
            }
            PlayerCommands::Rename {
                participant,
                name,
                tag,
            } => {
                let p = participant_for(league, &participant)?;
                let p = league.rename_participant(p.id, &name, tag.as_deref())?;
                println!("Renamed {} to {}", p.id.short(), p.name);
                Ok(true)
            }
            PlayerCommands::Remove { participant } => {
                let p = participant_for(league, &participant)?;
                league.deactivate_participant(p.id)?;
                println!("Deactivated {}", p.name);
                Ok(true)
            }
            PlayerCommands::List { all } => {
                print!("{}", participants_report(&league.participants(!all)?));
                Ok(false)
            }
        }
    }

    pub fn season(league: &mut CliLeague, action: SeasonCommands) -> Result<bool> {
        match action {
            SeasonCommands::Create { name } => {
                let s = league.create_season(&name)?;
                println!("Season {} is now active ({})", s.name, s.id.short());
                Ok(true)
            }
            SeasonCommands::List => {
                print!("{}", seasons_report(&league.seasons()?));
                Ok(false)
            }
        }
    }

    pub fn schedule(league: &mut CliLeague, season: Option<String>, shuffle: Option<u64>) -> Result<bool> {
        let season = season_for(league, season)?;
        match league.generate_schedule_for_active_roster(season.id, shuffle) {
            Ok(fixtures) => {
                let rounds = fixtures.iter().map(|f| f.round).max().unwrap_or(0);
                println!(
                    "Generated {} fixtures in {} rounds for {}",
                    fixtures.len(),
                    rounds,
                    season.name
                );
                Ok(true)
            }
            Err(LeagueError::FixturesAlreadyExist(_)) => {
                println!(
                    "Fixtures for {} were already generated; nothing to do",
                    season.name
                );
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn rounds(league: &CliLeague, season: Option<String>) -> Result<bool> {
        let season = season_for(league, season)?;
        let names = NameBook::new(&league.participants(false)?);
        print!("{}", rounds_report(&season, &league.rounds(season.id)?, &names));
        Ok(false)
    }

    pub fn result(league: &mut CliLeague, fixture: &str, metrics: &Metrics) -> Result<bool> {
        let data = league.store().data();
        let fixture = pick("fixture", fixture, &data.fixtures, |f| f.id.to_string())?.clone();
        let names = NameBook::new(&league.store().list_participants(false)?);

        let outcome = league.submit_result(fixture.id, metrics)?;
        match outcome {
            Outcome::A => println!("{} wins", names.name(fixture.side_a)),
            Outcome::B => println!("{} wins", names.name(fixture.side_b)),
            Outcome::DrawRematch => println!("Exact tie on stars, percentage and time: rematch required"),
            Outcome::Undetermined => println!("Result stored, winner undetermined"),
        }
        Ok(true)
    }

    pub fn standings(
        league: &CliLeague,
        config: &LeagueConfig,
        season: Option<String>,
        json: bool,
    ) -> Result<bool> {
        let season = season_for(league, season)?;
        let rows = league.compute_standings(season.id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print!("{}", standings_report(&config.name, &season, &rows));
        }
        Ok(false)
    }

    pub fn history(league: &CliLeague, participant: &str, season: Option<String>) -> Result<bool> {
        let season = season_for(league, season)?;
        let participant = participant_for(league, participant)?;
        let fixtures = league.participant_history(season.id, participant.id)?;
        let names = NameBook::new(&league.participants(false)?);
        print!("{}", history_report(&participant, &fixtures, &names));
        Ok(false)
    }
}
