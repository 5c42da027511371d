use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, info};

use gymlog::Tracker;
use gymlog::auth::TokenSigner;
use gymlog::dataset::{self, DatasetSource, ImportSummary};
use gymlog::db::{self, DEFAULT_DATABASE_URL, DbPool};
use gymlog::logging::{init_logger, level_from_env};

const CLI_POOL_SIZE: u32 = 2;
const SEED_BATCH_SIZE: usize = 100;

#[derive(Parser, Debug)]
#[command(version, about = "gymlog - exercise catalog and workout maintenance", long_about = None)]
struct Args {
    /// SQLite database path; falls back to DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import the exercise dataset, skipping names already in the catalog
    Import {
        /// Local dataset JSON file to read before the default location
        #[arg(long)]
        local: Option<PathBuf>,
        /// Download the dataset when no local copy exists
        #[arg(long)]
        download: bool,
        #[arg(long, default_value_t = 200)]
        batch_size: usize,
    },
    /// Import only when the exercise table is empty
    SeedIfEmpty {
        #[arg(long)]
        local: Option<PathBuf>,
        #[arg(long)]
        download: bool,
    },
    /// Drop every table, recreate the schema and import the dataset
    ResetAndImport {
        #[arg(long)]
        local: Option<PathBuf>,
        #[arg(long)]
        download: bool,
    },
    /// List a user's workouts
    ListWorkouts {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        verbose: bool,
    },
}

fn database_url(arg: Option<String>) -> String {
    arg.or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

fn open_pool(url: &str) -> Result<DbPool> {
    let pool = db::connect(url, CLI_POOL_SIZE)
        .with_context(|| format!("failed to open database {}", url))?;
    let mut conn = pool.get()?;
    db::run_migrations(&mut conn)?;
    Ok(pool)
}

fn print_summary(summary: &ImportSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// The catalog is checked before the dataset is read, so a populated database needs no
/// local copy.
async fn seed_if_empty(
    url: &str,
    local: Option<&Path>,
    download: bool,
) -> Result<Option<ImportSummary>> {
    let pool = open_pool(url)?;
    let mut conn = pool.get()?;
    if !dataset::seed::catalog_is_empty(&mut conn)? {
        return Ok(None);
    }
    let records = DatasetSource::default().load(local, download).await?;
    Ok(dataset::seed::seed_if_empty(&mut conn, &records, SEED_BATCH_SIZE)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    init_logger(level_from_env(LevelFilter::Info));
    let url = database_url(args.database_url);

    match args.command {
        Commands::Import {
            local,
            download,
            batch_size,
        } => {
            let records = DatasetSource::default()
                .load(local.as_deref(), download)
                .await?;
            let pool = open_pool(&url)?;
            let mut conn = pool.get()?;
            let summary = dataset::import(&mut conn, &records, batch_size)?;
            print_summary(&summary)
        }
        Commands::SeedIfEmpty { local, download } => {
            match seed_if_empty(&url, local.as_deref(), download).await? {
                Some(summary) => print_summary(&summary),
                None => {
                    println!("Catalog already populated; nothing imported");
                    Ok(())
                }
            }
        }
        Commands::ResetAndImport { local, download } => {
            let records = DatasetSource::default()
                .load(local.as_deref(), download)
                .await?;
            let pool = open_pool(&url)?;
            let mut conn = pool.get()?;
            db::reset_database(&mut conn)?;
            info!("Schema recreated at {}", url);
            let summary = dataset::import(&mut conn, &records, SEED_BATCH_SIZE)?;
            print_summary(&summary)
        }
        Commands::ListWorkouts { username, verbose } => {
            let pool = open_pool(&url)?;
            // Tokens are never issued from here; the signer only satisfies the tracker.
            let tracker = Tracker::new(pool, TokenSigner::new("gymlog-cli", 0)?);
            let (user, workouts) = tracker.workouts_for_username(&username)?;
            if workouts.is_empty() {
                println!("No workouts for {}", user.username);
            }
            for workout in workouts {
                let session = &workout.session;
                let status = if session.is_active() { "active" } else { "finished" };
                println!(
                    "{}, {}, {} ({})",
                    session.id,
                    session.name.as_deref().unwrap_or("Unnamed Workout"),
                    session.start_time.format("%Y-%m-%d %H:%M"),
                    status
                );
                if verbose {
                    for entry in &workout.exercises {
                        for displayable in entry.displayable_sets() {
                            println!("\t{}", displayable);
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_defaults_parse() {
        let args = Args::try_parse_from(["gymlog-cli", "import", "--local", "x.json"]).unwrap();
        match args.command {
            Commands::Import {
                local,
                download,
                batch_size,
            } => {
                assert_eq!(local, Some(PathBuf::from("x.json")));
                assert!(!download);
                assert_eq!(batch_size, 200);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn seed_if_empty_skips_populated_catalog_without_reading_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("cli.db");
        let url = url.to_str().unwrap();
        let dataset = dir.path().join("exercises.json");
        std::fs::write(&dataset, r#"[{"name": "Kettlebell Swing", "level": "beginner"}]"#).unwrap();

        let first = seed_if_empty(url, Some(dataset.as_path()), false).await.unwrap();
        assert_eq!(first.map(|s| s.inserted), Some(1));

        std::fs::remove_file(&dataset).unwrap();
        let second = seed_if_empty(url, Some(dataset.as_path()), false).await.unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn list_workouts_requires_username() {
        assert!(Args::try_parse_from(["gymlog-cli", "list-workouts"]).is_err());
        let args = Args::try_parse_from([
            "gymlog-cli",
            "--database-url",
            "t.db",
            "list-workouts",
            "-u",
            "melanie",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.database_url.as_deref(), Some("t.db"));
        assert!(matches!(
            args.command,
            Commands::ListWorkouts { ref username, verbose: true } if username == "melanie"
        ));
    }
}
