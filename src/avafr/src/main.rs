#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::Context;
use avafr::{
    DatabaseHandler, PipelineConfig, ReadinessPipeline,
    ingest::{AuthPolicy, IngestRequest, IngestService},
    report::{DEFAULT_ANALYSIS_PATH, DEFAULT_REPORT_PATH, DataAnalysis, ReadinessReport},
    score_prepared, synthetic,
};
use avafr_algos::{KnnImputer, Recommendation};
use avafr_csv::{DEFAULT_CHUNK_SIZE, load_prepared, write_prepared};
use avafr_db::SearchPrepared;
use avafr_types::{DataType, UserDay};
use chrono::NaiveDate;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;

#[derive(Parser)]
#[command(name = "avafr")]
pub struct AvafrCli {
    #[arg(env, long, default_value = "sqlite://avafr.db?mode=rwc")]
    pub database_url: String,
    #[clap(subcommand)]
    pub subcommand: AvafrCommand,
}

#[derive(Subcommand)]
pub enum AvafrCommand {
    ///
    /// Merge activity, sleep and heart rate files and score every day
    ///
    Analyze {
        #[arg(long, default_value = "dailyActivity_merged.csv")]
        activity: PathBuf,
        #[arg(long, default_value = "sleepDay_merged.csv")]
        sleep: PathBuf,
        #[arg(long, default_value = "heartrate_seconds_merged.csv")]
        heart_rate: PathBuf,
        #[arg(long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,
        /// Also write the scored table as a prepared CSV
        #[arg(long)]
        prepared: Option<PathBuf>,
        /// Also upsert the scored table into the database
        #[arg(long)]
        store: bool,
        #[arg(env, long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        #[arg(long, default_value_t = KnnImputer::DEFAULT_K)]
        neighbours: usize,
    },
    ///
    /// Score a prepared CSV and print workout recommendations
    ///
    Score {
        #[arg(default_value = "synthetic_prepared_data.csv")]
        input: PathBuf,
        #[arg(long, default_value = "readiness_scores.csv")]
        output: PathBuf,
        #[arg(long, default_value_t = KnnImputer::DEFAULT_K)]
        neighbours: usize,
    },
    ///
    /// Load a prepared CSV into the database
    ///
    Seed {
        input: PathBuf,
        /// Remove stored rows first
        #[arg(long)]
        replace: bool,
    },
    ///
    /// Describe the prepared rows stored in the database
    ///
    Describe {
        #[arg(long)]
        user: Option<i64>,
        /// Write to a file instead of stdout
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_ANALYSIS_PATH)]
        output: Option<PathBuf>,
    },
    ///
    /// Print the stored resting heart rate and score for one user day
    ///
    Lookup { user_id: i64, date: NaiveDate },
    ///
    /// Store a health payload for a user
    ///
    Ingest {
        data_type: DataType,
        /// JSON object
        data: String,
        #[arg(long)]
        user_id: Option<String>,
        /// Identity already verified by the caller
        #[arg(env = "AVAFR_IDENTITY", long)]
        identity: Option<String>,
        #[arg(env, long, default_value_t = true, action = ArgAction::Set)]
        require_auth: bool,
        #[arg(env, long, default_value = "demo")]
        fallback_user: String,
    },
    ///
    /// List stored health payloads for a user, newest first
    ///
    Records {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        data_type: Option<DataType>,
        #[arg(long)]
        limit: Option<u64>,
        /// Identity already verified by the caller
        #[arg(env = "AVAFR_IDENTITY", long)]
        identity: Option<String>,
        #[arg(env, long, default_value_t = true, action = ArgAction::Set)]
        require_auth: bool,
        #[arg(env, long, default_value = "demo")]
        fallback_user: String,
    },
    ///
    /// Generate a normally distributed prepared CSV
    ///
    Synthesize {
        #[arg(long, default_value_t = 1000)]
        rows: usize,
        #[arg(long, default_value = "synthetic_prepared_data.csv")]
        output: PathBuf,
    },
    ///
    /// Print shell completions
    ///
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx::query", log::LevelFilter::Off)
        .filter_module("sea_orm_migration::migrator", log::LevelFilter::Off)
        .init();

    let cli = AvafrCli::parse();
    let database_url = cli.database_url;

    match cli.subcommand {
        AvafrCommand::Analyze {
            activity,
            sleep,
            heart_rate,
            output,
            prepared,
            store,
            chunk_size,
            neighbours,
        } => {
            let config = PipelineConfig {
                chunk_size,
                neighbours,
                ..PipelineConfig::new(activity, sleep, heart_rate)
            };
            let result = ReadinessPipeline::new(config)
                .run()
                .inspect_err(|e| error!("{:#}", e))?;

            ReadinessReport::new(&result.rows, result.counts.imputed).write_to(&output)?;

            if let Some(path) = prepared {
                write_prepared(&path, &result.rows)?;
                info!("Prepared rows written to {}", path.display());
            }

            if store {
                let db = DatabaseHandler::new(database_url).await?;
                let stored = db.create_prepared_rows(&result.rows).await?;
                info!("Stored {} rows", stored);
            }

            Ok(())
        }
        AvafrCommand::Score {
            input,
            output,
            neighbours,
        } => {
            let mut rows = load_prepared(&input)
                .inspect_err(|e| error!("{}", e))?
                .records;
            let counts = score_prepared(&mut rows, neighbours);
            write_prepared(&output, &rows)?;

            println!(
                "Scored {} of {} rows ({} imputed), written to {}",
                counts.scored,
                counts.merged,
                counts.imputed,
                output.display()
            );
            if let Some(score) = rows.iter().find_map(|r| r.readiness_score) {
                let recommendation = Recommendation::from_score(score);
                println!("Readiness score: {:.2}", score);
                println!("Recommendation: {}", recommendation.advice());
            }

            Ok(())
        }
        AvafrCommand::Seed { input, replace } => {
            let loaded = load_prepared(&input).inspect_err(|e| error!("{}", e))?;
            let db = DatabaseHandler::new(database_url).await?;

            if replace {
                let deleted = db.delete_prepared_rows().await?;
                info!("Removed {} stored rows", deleted);
            }

            let stored = db.create_prepared_rows(&loaded.records).await?;
            println!(
                "Seeded {} rows from {} ({} skipped)",
                stored,
                input.display(),
                loaded.skipped
            );
            Ok(())
        }
        AvafrCommand::Describe { user, output } => {
            let db = DatabaseHandler::new(database_url).await?;
            let rows = db
                .search_prepared(SearchPrepared {
                    user_id: user,
                    ..Default::default()
                })
                .await?;

            let analysis = DataAnalysis::new(&rows);
            match output {
                Some(path) => analysis.write_to(path)?,
                None => println!("{}", analysis),
            }
            Ok(())
        }
        AvafrCommand::Lookup { user_id, date } => {
            let db = DatabaseHandler::new(database_url).await?;
            let row = db.get_prepared_row(UserDay::new(user_id, date)).await?;

            match row.and_then(|r| r.resting_heart_rate.map(|hr| (hr, r.readiness_score))) {
                Some((resting, score)) => {
                    println!("Resting heart rate: {:.2}", resting);
                    match score {
                        Some(score) => println!(
                            "Readiness score: {:.2} ({})",
                            score,
                            Recommendation::from_score(score)
                        ),
                        None => println!("Readiness score: not found"),
                    }
                }
                None => println!("not found"),
            }
            Ok(())
        }
        AvafrCommand::Ingest {
            data_type,
            data,
            user_id,
            identity,
            require_auth,
            fallback_user,
        } => {
            let data = serde_json::from_str(&data).context("payload is not valid JSON")?;
            let db = DatabaseHandler::new(database_url).await?;
            let service = IngestService::new(
                &db,
                AuthPolicy {
                    require_auth,
                    fallback_user,
                },
            );

            let response = service
                .ingest(
                    identity.as_deref(),
                    IngestRequest {
                        user_id,
                        data_type,
                        data,
                    },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        AvafrCommand::Records {
            user_id,
            data_type,
            limit,
            identity,
            require_auth,
            fallback_user,
        } => {
            let db = DatabaseHandler::new(database_url).await?;
            let service = IngestService::new(
                &db,
                AuthPolicy {
                    require_auth,
                    fallback_user,
                },
            );

            let records = service
                .records(identity.as_deref(), user_id, data_type, limit)
                .await?;
            if records.is_empty() {
                println!("No records");
            }
            for record in records {
                println!(
                    "{} {} {} {}",
                    record.created_at, record.user_id, record.data_type, record.data
                );
            }
            Ok(())
        }
        AvafrCommand::Synthesize { rows, output } => {
            let rows = synthetic::generate(rows, &mut rand::rng());
            write_prepared(&output, &rows)?;
            println!("Wrote {} synthetic rows to {}", rows.len(), output.display());
            Ok(())
        }
        AvafrCommand::Completions { shell } => {
            let mut command = AvafrCli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
