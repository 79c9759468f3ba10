//! Command-line entry point.
//!
//! # Responsibility
//! - Keep a tiny `ping` command to validate core crate wiring.
//! - Drive the car maker bulk insert against a database file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use showroom_core::db::open_db;
use showroom_core::{default_log_level, init_logging, CarMaker, CarMakerService};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "showroom", version, about = "Showroom storage demos")]
struct Cli {
    /// Absolute directory for rolling log files; no logging when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core linkage check and version
    Ping,
    /// Insert a maker and its models from a JSON file in one transaction
    /// (sample: demos/toyota.json)
    BulkInsert {
        #[arg(long)]
        db: PathBuf,
        /// JSON object: {"name": "...", "models": [{"name": "..."}]}
        #[arg(long)]
        file: PathBuf,
    },
    /// List makers with their models
    Makers {
        #[arg(long)]
        db: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(&cli.log_level, &log_dir.to_string_lossy())?;
    }

    match cli.command {
        Command::Ping => {
            println!("showroom_core ping={}", showroom_core::ping());
            println!("showroom_core version={}", showroom_core::core_version());
        }
        Command::BulkInsert { db, file } => {
            let maker = bulk_insert_from_file(&db, &file)?;
            println!(
                "maker `{}` id={} models_inserted={}",
                maker.name,
                maker.id.unwrap_or_default(),
                maker.models.len()
            );
        }
        Command::Makers { db } => {
            for maker in load_makers(&db)? {
                println!("{} {}", maker.id.unwrap_or_default(), maker.name);
                for model in &maker.models {
                    println!(
                        "  {} {} sku={} year={}",
                        model.id.unwrap_or_default(),
                        model.name,
                        model.sku.as_deref().unwrap_or("-"),
                        model.year.map_or_else(|| "-".to_string(), |y| y.to_string())
                    );
                }
            }
        }
    }

    Ok(())
}

fn bulk_insert_from_file(db: &Path, file: &Path) -> anyhow::Result<CarMaker> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mut maker: CarMaker = serde_json::from_str(&raw)
        .with_context(|| format!("invalid maker JSON in {}", file.display()))?;

    let mut conn = open_db(db)?;
    let count = CarMakerService::new(&mut conn).bulk_insert(&mut maker)?;
    info!("event=cli_bulk_insert module=cli status=ok models={count}");
    Ok(maker)
}

fn load_makers(db: &Path) -> anyhow::Result<Vec<CarMaker>> {
    let mut conn = open_db(db)?;
    let service = CarMakerService::new(&mut conn);

    let mut makers = Vec::new();
    for listed in service.list_makers()? {
        let Some(id) = listed.id else { continue };
        if let Some(maker) = service.find_maker(id)? {
            makers.push(maker);
        }
    }
    Ok(makers)
}
