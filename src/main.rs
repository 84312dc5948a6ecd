use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use staffing_engine::api::{AppState, create_router};
use staffing_engine::config::ConfigLoader;
use staffing_engine::export::{write_json, write_tables};
use staffing_engine::ingest::{read_census_path, read_resources_path, read_rules_path, read_shifts_path};
use staffing_engine::models::{DroppedRows, Season};
use staffing_engine::planning::{PlanInputs, PlanOptions, run_pipeline};

/// Hospital staffing planner
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan staffing from CSV tables and write the output tables
    Plan {
        /// Settings file with season rules and fallback shifts
        #[arg(long)]
        config: PathBuf,
        /// Census CSV (Date, Hour, Census)
        #[arg(long)]
        census: PathBuf,
        /// Staffing rules CSV
        #[arg(long)]
        rules: PathBuf,
        /// Resources CSV
        #[arg(long)]
        resources: PathBuf,
        /// Explicit shift blocks CSV; omitted uses the settings file
        #[arg(long)]
        shifts: Option<PathBuf>,
        /// Force every census record into one season (Low, Medium, High)
        #[arg(long)]
        season: Option<String>,
        /// Directory for the output CSV files
        #[arg(long)]
        out: PathBuf,
        /// Also write the whole output as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Run timestamp for summary.csv (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS);
        /// omitted leaves it blank so reruns are byte-identical
        #[arg(long, value_parser = parse_run_date)]
        run_date: Option<NaiveDateTime>,
    },

    /// Serve the planner over HTTP
    Serve {
        /// Settings file with season rules and fallback shifts
        #[arg(long)]
        config: PathBuf,
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

fn parse_run_date(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(stamp);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| format!("'{}' is not a date (YYYY-MM-DD) or datetime", value))
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Plan {
            config,
            census,
            rules,
            resources,
            shifts,
            season,
            out,
            json,
            run_date,
        } => {
            let loader = ConfigLoader::load(&config)?;
            let season_override = season.as_deref().map(Season::from_str).transpose()?;

            let census_rows = read_census_path(&census)?;
            let rule_rows = read_rules_path(&rules)?;
            let resource_rows = read_resources_path(&resources)?;
            let (shift_table, dropped_shifts) = match &shifts {
                Some(path) => {
                    let rows = read_shifts_path(path)?;
                    (rows.records, rows.dropped)
                }
                None => (Vec::new(), 0),
            };
            let dropped_rows = DroppedRows {
                census: census_rows.dropped,
                rules: rule_rows.dropped,
                resources: resource_rows.dropped,
                shifts: dropped_shifts,
            };

            let inputs = PlanInputs {
                census: census_rows.records,
                rules: rule_rows.records,
                resources: resource_rows.records,
                shift_table,
            };
            let options = PlanOptions {
                season_override,
                input_name: census
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| census.display().to_string()),
                run_date,
                dropped_rows,
            };

            let output = run_pipeline(&inputs, loader.config(), &options)?;
            write_tables(&out, &output)
                .with_context(|| format!("writing tables to {}", out.display()))?;
            if let Some(path) = json {
                write_json(&path, &output)?;
            }

            println!(
                "{} plan rows, {} schedule rows, {} rows dropped, shortage {}, surplus {} -> {}",
                output.summary.plan_rows,
                output.summary.schedule_rows,
                output.summary.dropped_rows.total(),
                output.summary.total_shortage,
                output.summary.total_surplus,
                out.display()
            );
        }
        Commands::Serve { config, addr } => {
            let loader = ConfigLoader::load(&config)?;
            let app = create_router(AppState::new(loader));

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            info!(addr = %addr, "Staffing engine listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
