//! `healthlog` command line entry point.
//!
//! # Responsibility
//! - Wire configuration, logging, SQLite storage and one record session.
//! - Render session output as text or JSON.

mod args;

use args::{Cli, Command};
use clap::Parser;
use healthlog_core::db::open_db;
use healthlog_core::{
    default_log_level, init_logging, AppConfig, DateKey, EntryDraft, Evaluation, FeedbackSink,
    Metric, RecordRepository, RecordSession, SessionError, SqliteRecordRepository,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "healthlog.db";

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Prints the coach's reaction to the terminal.
struct ConsoleSink {
    quiet: bool,
}

impl FeedbackSink for ConsoleSink {
    fn present(&mut self, evaluation: &Evaluation) {
        if self.quiet {
            return;
        }
        println!("[{}] {}", evaluation.category.as_str(), evaluation.message);
        println!("  image={} voice={}", evaluation.image_ref, evaluation.audio_ref);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(log_dir) = &config.log_dir {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let db_path = cli
        .db
        .clone()
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
    let conn = open_db(&db_path)?;
    let repo = SqliteRecordRepository::new(&conn, config.user_id.as_str());
    let sink = ConsoleSink { quiet: cli.json };
    let mut session = RecordSession::new(repo, sink).with_calorie_target(config.calorie_target);
    start_session(&mut session).await?;
    info!(
        "event=cli_command module=cli status=start session_id={}",
        session.id()
    );

    match cli.command {
        Command::Record {
            date,
            weight,
            sleep,
            calories,
            exercise,
        } => {
            let draft = EntryDraft {
                date: DateKey::parse(&date)?,
                weight,
                sleep_hours: sleep,
                calories,
                exercise_minutes: exercise,
            };
            match session.submit(draft).await {
                Ok(feedback) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&feedback)?);
                }
                Ok(Some(_)) => {}
                Ok(None) => println!("saved {date}; no feedback for this day"),
                Err(err) => eprintln!("notice: {err}"),
            }
        }
        Command::Show { date } => {
            let date = DateKey::parse(&date)?;
            let Some(entry) = session.store().get(date).cloned() else {
                eprintln!("notice: no record for {date}");
                session.teardown();
                return Ok(());
            };
            let feedback = session.feedback_for(date);
            if cli.json {
                let body = serde_json::json!({ "entry": entry, "feedback": feedback });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{date}");
                for metric in Metric::ALL {
                    if let Some(value) = entry.metric(metric) {
                        println!("  {:<9} {value}", metric.as_str());
                    }
                }
                if let Some(feedback) = feedback {
                    if let Some(delta) = feedback.weight_delta {
                        println!("  {:<9} {delta:+.3}", "delta");
                    }
                    println!(
                        "[{}] {}",
                        feedback.selected.category.as_str(),
                        feedback.selected.message
                    );
                }
            }
        }
        Command::History {
            metric,
            window,
            until,
        } => {
            let metric = Metric::parse(&metric)
                .ok_or_else(|| format!("unknown metric `{metric}`"))?;
            let anchor = match until {
                Some(text) => Some(DateKey::parse(&text)?),
                None => session.store().ledger().iter().last().map(|entry| entry.date),
            };
            let points = match anchor {
                Some(anchor) => session.store().series(metric, window.into(), anchor),
                None => Vec::new(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                for point in &points {
                    println!("{}  {}", point.date, point.value);
                }
            }
        }
    }

    session.teardown();
    Ok(())
}

/// Loads the ledger; a failed load is a notice and leaves an empty ledger.
async fn start_session<R: RecordRepository, D: FeedbackSink>(
    session: &mut RecordSession<R, D>,
) -> Result<(), SessionError> {
    match session.start().await {
        Ok(_) => Ok(()),
        Err(SessionError::Load(err)) => {
            eprintln!("notice: could not load records, continuing with an empty calendar: {err}");
            session.acknowledge_error();
            Ok(())
        }
        Err(err) => Err(err),
    }
}
