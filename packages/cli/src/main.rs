#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the flood scenario workspace.
//!
//! Drives a [`Workspace`] against a live assessment service with an
//! in-memory map, printing results and history to the terminal. Service
//! settings come from `FLOOD_*` environment variables and can be
//! overridden with flags.

mod console;

use clap::{Parser, Subcommand};
use flood_workspace::{RefreshOutcome, Workspace};
use flood_workspace_client::{ClientConfig, HttpAssessmentClient};
use flood_workspace_map::{HeadlessMap, MarkerSet};
use flood_workspace_reference::{SampleLibrary, StateDirectory};
use flood_workspace_scenario_models::Indicator;

use crate::console::ConsoleView;

#[derive(Parser)]
#[command(name = "flood_workspace", about = "Flood risk scenario workspace")]
struct Cli {
    /// Assessment service origin (overrides `FLOOD_API_BASE`)
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// Number of history entries to fetch, 1-30 (overrides `FLOOD_HISTORY_LIMIT`)
    #[arg(long, global = true)]
    history_limit: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a scenario, starting from the state's curated sample
    Assess {
        /// State name (e.g., "Kerala")
        #[arg(long)]
        state: String,
        /// District name; defaults to the sample's district
        #[arg(long)]
        district: Option<String>,
        /// Override one indicator (e.g., `--set MonsoonIntensity=95`). Repeatable.
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override)]
        overrides: Vec<(Indicator, i64)>,
    },
    /// Show the assessment history and the markers it produces
    History,
    /// List states with their districts and curated samples
    States,
}

fn parse_override(text: &str) -> Result<(Indicator, i64), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{text}'"))?;
    let indicator = Indicator::from_name(name.trim()).map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for {indicator}: {e}"))?;
    Ok((indicator, value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base)?;
    }
    if let Some(limit) = cli.history_limit {
        config = config.with_history_limit(limit)?;
    }

    match cli.command {
        Commands::States => print_states(),
        Commands::History => {
            let workspace = Workspace::new(
                HttpAssessmentClient::new(&config)?,
                HeadlessMap::new(),
                ConsoleView,
            );
            if let RefreshOutcome::Failed(e) = workspace.start().await {
                return Err(e.into());
            }
            workspace.with_markers(print_markers);
            workspace.teardown();
        }
        Commands::Assess {
            state,
            district,
            overrides,
        } => {
            log::info!("Assessing {state} against {}", config.api_base);
            let workspace = Workspace::new(
                HttpAssessmentClient::new(&config)?,
                HeadlessMap::new(),
                ConsoleView,
            );
            workspace.start().await;
            workspace.select_state(&state);
            if let Some(district) = district {
                workspace.select_district(&district);
            }
            for (indicator, value) in overrides {
                workspace.set_indicator(indicator, value);
            }

            let outcome = workspace.submit().await?;
            if outcome.edited_since_submit {
                log::warn!("Scenario changed while the assessment was in flight");
            }
            workspace.with_markers(print_markers);
            workspace.teardown();
        }
    }

    Ok(())
}

fn print_states() {
    let directory = StateDirectory::embedded();
    let samples = SampleLibrary::embedded();
    for state in directory.states() {
        let sample = samples
            .get(state)
            .map_or_else(String::new, |s| format!(" [sample: {}]", s.district));
        println!("{state}{sample}");
        println!("  {}", directory.districts(state).join(", "));
    }
}

fn print_markers(markers: &MarkerSet<HeadlessMap>) {
    println!();
    println!("{} marker(s) on map", markers.len());
    for marker in markers.markers() {
        println!(
            "  {:<8} {} {}, {}",
            marker.color, marker.position, marker.detail.district, marker.detail.state
        );
    }
    if let Some(view) = markers.widget().view() {
        println!("View: {} at zoom {}", view.center, view.zoom);
    }
}
