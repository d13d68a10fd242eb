mod config;
mod error;
mod export;
mod fetcher;
mod frequency;
mod posting;

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::export::{json, sqlite, tabular};
use crate::fetcher::HttpPageSource;
use crate::frequency::FrequencyTable;
use crate::posting::FlatRecord;

#[derive(Parser)]
#[command(name = "jobstacks", about = "Job posting tech stack collector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every listing page and save the records as JSON
    Fetch {
        /// Stop after this many pages even if the listing is not exhausted
        #[arg(long)]
        max_pages: Option<NonZeroU32>,
    },
    /// Count skill mentions in a previously saved records file
    Count {
        /// Records file (default: output.records_json)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Fetch, count, and write records and counts to every sink
    Export {
        #[arg(long)]
        max_pages: Option<NonZeroU32>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(base_url = %settings.api.base_url, "Settings loaded");

    match cli.command {
        Commands::Fetch { max_pages } => {
            let records = fetch(&settings, max_pages)?;
            println!("\n\nfetch finished\n\n");
            print_records(&records);
            json::write_json(&settings.output.records_json, &records)?;
            println!(
                "Saved {} records to {:?}",
                records.len(),
                settings.output.records_json
            );
        }
        Commands::Count { input } => {
            let path = input.unwrap_or_else(|| settings.output.records_json.clone());
            let table = frequency::count_from_file(&path);
            if table.is_empty() {
                println!("No skills counted.");
                return Ok(());
            }
            print_frequency(&table);
            println!("\n{} skills, {} mentions", table.len(), table.total());
        }
        Commands::Export { max_pages } => {
            let records = fetch(&settings, max_pages)?;
            let table = frequency::count_skills(&records);
            print_frequency(&table);

            let out = &settings.output;
            json::write_json(&out.records_json, &records)?;
            tabular::write_records(&out.records_csv, &records)?;
            json::write_json(&out.frequency_json, &table)?;
            tabular::write_frequency(&out.frequency_csv, &table)?;

            let db = &settings.database.path;
            let postings = sqlite::store_postings(db, &records);
            let skills = sqlite::store_frequency(db, &table);
            println!(
                "Saved {} records and {} skills to files; database: {} postings, {} skills",
                records.len(),
                table.len(),
                stored(postings),
                stored(skills),
            );
        }
    }

    info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}

/// Command-line cap wins over the configured one.
fn fetch(
    settings: &Settings,
    max_pages: Option<NonZeroU32>,
) -> anyhow::Result<Vec<FlatRecord>> {
    let mut source = HttpPageSource::new(&settings.api)?;
    let records = fetcher::fetch_all(&mut source, max_pages.or(settings.api.max_pages))?;
    Ok(records)
}

fn print_records(records: &[FlatRecord]) {
    for r in records {
        println!(
            "{} | {} | {} | {}",
            r.company_name, r.location, r.job_category, r.skill
        );
    }
    println!("\n{} records", records.len());
}

fn print_frequency(table: &FrequencyTable) {
    for (tech, freq) in table.iter() {
        println!("{}: {}", tech, freq);
    }
}

fn stored(rows: Option<usize>) -> String {
    rows.map(|n| n.to_string())
        .unwrap_or_else(|| "failed".into())
}
