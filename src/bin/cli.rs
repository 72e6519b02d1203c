//! Reshare CLI
//!
//! Local execution entry point.

use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use reshare::{
    comment,
    error::Result,
    models::{Config, StoredToken},
    pipeline,
    publish,
    services::{FeedScraper, Session, TokenStore},
    storage::{HistoryStore, LocalHistory},
};

/// Reshare - topic-driven feed repost bot
#[derive(Parser, Debug)]
#[command(name = "reshare", version, about = "Topic-driven feed repost bot")]
struct Cli {
    /// Path to storage directory containing config and state files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store an access token for later runs
    Login,

    /// Run a single engagement cycle now
    Run,

    /// Run the scheduler, firing daily slots until interrupted
    Schedule,

    /// Show the remaining action slots for today
    Plan,

    /// Validate the configuration file
    Validate,

    /// Show recorded engagement history
    History {
        /// Number of most recent records to show
        #[arg(long, default_value_t = 10)]
        last: usize,
    },

    /// Write the daily activity report
    Report {
        /// Calendar day to report on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    let token_store = TokenStore::new(cli.storage_dir.join(&config.paths.token_file));
    let history = LocalHistory::new(cli.storage_dir.join(&config.paths.history_file));
    let reports_dir = cli.storage_dir.join("reports");

    match cli.command {
        Command::Login => {
            print!("Paste access token: ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            let access_token = line.trim().to_string();
            if access_token.is_empty() {
                return Err(reshare::error::AppError::auth("Empty token"));
            }

            let token = StoredToken::with_default_expiry(access_token, Utc::now());
            token_store.save(&token)?;
            log::info!(
                "Token stored; valid until {}",
                chrono::DateTime::from_timestamp(token.expires_at, 0)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default()
            );
        }

        Command::Run => {
            config.validate()?;
            let session = Session::establish(&config, &token_store, Utc::now())?;

            let source = FeedScraper::new(
                session.client.clone(),
                &config,
                session.token.access_token.clone(),
            );
            let policy = comment::from_config(&config.comments, &config.discovery.topics);
            let publisher = publish::from_config(
                session.client.clone(),
                &config,
                session.token.access_token.clone(),
            );

            let outcome = pipeline::run_cycle(
                &config,
                &source,
                policy.as_ref(),
                publisher.as_ref(),
                &history,
                Local::now(),
            )
            .await?;
            log::info!("Cycle finished: {:?}", outcome);
        }

        Command::Schedule => {
            config.validate()?;
            let session = Session::establish(&config, &token_store, Utc::now())?;

            let source = FeedScraper::new(
                session.client.clone(),
                &config,
                session.token.access_token.clone(),
            );
            let policy = comment::from_config(&config.comments, &config.discovery.topics);
            let publisher = publish::from_config(
                session.client.clone(),
                &config,
                session.token.access_token.clone(),
            );

            log::info!(
                "Scheduler starting: window {:02}:00-{:02}:00, cap {}",
                config.schedule.window_start_hour,
                config.schedule.window_end_hour,
                config.schedule.max_posts_per_day
            );

            // One immediate cycle, then re-arm on the daily plan.
            match pipeline::run_cycle(
                &config,
                &source,
                policy.as_ref(),
                publisher.as_ref(),
                &history,
                Local::now(),
            )
            .await
            {
                Ok(outcome) => log::info!("Initial cycle finished: {:?}", outcome),
                Err(e) => log::error!("Initial cycle failed: {}", e),
            }

            pipeline::run_scheduler(
                &config,
                &source,
                policy.as_ref(),
                publisher.as_ref(),
                &history,
                &reports_dir,
            )
            .await?;
            log::info!("Scheduler stopped");
        }

        Command::Plan => {
            let now = Local::now();
            let posted = history.load().await?.posted_on(now.date_naive());
            let slots = pipeline::plan_slots(now, &config.schedule, posted);

            log::info!(
                "{} action(s) taken today, {} slot(s) remaining",
                posted,
                slots.len()
            );
            for (i, slot) in slots.iter().enumerate() {
                log::info!("  slot {}: {}", i + 1, slot.format("%H:%M:%S"));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("Config OK ({} topic(s))", config.discovery.topics.len());

            match token_store.load()? {
                Some(token) if token.is_expired(Utc::now()) => {
                    log::warn!("Stored token has expired; run 'reshare login'");
                }
                Some(_) => log::info!("Stored token is valid"),
                None => log::warn!("No stored token yet; run 'reshare login'"),
            }
        }

        Command::History { last } => {
            let history = history.load().await?;
            let total = history.posts.len();
            log::info!(
                "{} recorded action(s), {} today",
                total,
                history.posted_on(Local::now().date_naive())
            );

            for record in history.posts.iter().rev().take(last).rev() {
                log::info!(
                    "  {} {} by '{}' ({} image(s)): {}",
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                    record.post_id,
                    record.author,
                    record.image_count,
                    record.comment
                );
            }
        }

        Command::Report { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let history = history.load().await?;
            let report =
                pipeline::build_report(&history, date, config.schedule.max_posts_per_day);
            let path = pipeline::write_report(&report, &reports_dir).await?;
            log::info!(
                "Report for {}: {}/{} actions, written to {}",
                date,
                report.completed,
                report.target,
                path.display()
            );
        }
    }

    Ok(())
}
