//! Command-line front end: route the sector of a CSV point file.
#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use route_sequencer::config::PlannerConfig;
use route_sequencer::geolocation::{FixedPosition, PositionOptions};
use route_sequencer::haversine::HaversineLookup;
use route_sequencer::import::load_points;
use route_sequencer::matrix::LookupMode;
use route_sequencer::osrm::OsrmClient;
use route_sequencer::planner::RoutePlanner;
use route_sequencer::sector::Sector;
use route_sequencer::session::{FileSessionStore, SessionGate};
use route_sequencer::solver::SolveOptions;
use route_sequencer::traits::RouteLookup;
use route_sequencer::Tour;

#[derive(Debug, Parser)]
#[command(name = "route-sequencer", about = "Order the points inside a sector into a route")]
struct Cli {
    /// CSV export with address, latitude and longitude columns.
    points: PathBuf,

    /// Sector as SOUTH,WEST,NORTH,EAST (any two opposite corners).
    #[arg(long, value_parser = parse_sector, allow_hyphen_values = true)]
    sector: Sector,

    /// Start from this live position, LAT,LNG.
    #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
    from: Option<(f64, f64)>,

    /// Skip OSRM and use straight-line estimates only.
    #[arg(long)]
    offline: bool,

    /// Resolve matrix rows concurrently.
    #[arg(long)]
    parallel: bool,

    /// JSON config file; environment variables still override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sign in with this email when no saved session exists.
    #[arg(long, requires = "password")]
    email: Option<String>,

    #[arg(long, env = "ROUTE_SEQUENCER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    summary: String,
    tour: Option<&'a Tour>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("route-sequencer: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => PlannerConfig::from_json_file(path)?,
        None => PlannerConfig::default(),
    };
    let config = base.with_overrides(|var| std::env::var(var).ok())?;

    let mut session = SessionGate::new(
        config.credentials.clone(),
        FileSessionStore::new(&config.session_dir),
    );
    if session.restore()?.is_none() {
        let signed_in = match (&cli.email, &cli.password) {
            (Some(email), Some(password)) => session.login(email, password)?,
            _ => return Err("not signed in; pass --email and --password".into()),
        };
        if !signed_in {
            return Err("invalid email or password".into());
        }
    }

    let lookup: Box<dyn RouteLookup + Sync> = if cli.offline {
        Box::new(HaversineLookup)
    } else {
        Box::new(OsrmClient::new(config.osrm.clone())?)
    };

    let options = SolveOptions {
        lookup_mode: if cli.parallel {
            LookupMode::Parallel
        } else {
            config.lookup_mode
        },
    };

    let mut planner = RoutePlanner::new();
    planner.load_points(load_points(&cli.points)?);
    planner.select_sector(cli.sector);
    if let Some(location) = cli.from {
        planner.locate(&FixedPosition(location), &PositionOptions::default())?;
    }

    planner.calculate_route(&lookup, &options)?;

    let frame = planner.frame();
    let output = Output {
        summary: frame.summary(),
        tour: planner.tour(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_numbers<const N: usize>(raw: &str) -> Result<[f64; N], String> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|err| format!("{part:?}: {err}")))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|values: Vec<f64>| format!("expected {N} numbers, got {}", values.len()))
}

fn parse_sector(raw: &str) -> Result<Sector, String> {
    let [south, west, north, east] = parse_numbers::<4>(raw)?;
    Ok(Sector::from_corners((south, west), (north, east)))
}

fn parse_location(raw: &str) -> Result<(f64, f64), String> {
    let [lat, lng] = parse_numbers::<2>(raw)?;
    Ok((lat, lng))
}
