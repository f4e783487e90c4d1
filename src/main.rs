use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use release_watch::check::{Outcome, run_check};
use release_watch::config::{self, Config, LOG_FORMAT_ENV};
use release_watch::notify::Notifier;
use release_watch::notify::mailer::SmtpMailer;
use release_watch::source::ReleaseSource;
use release_watch::source::release_page::ReleasePage;
use release_watch::store::{FileStore, VersionStore};

#[derive(Parser)]
#[command(name = "release-watch")]
#[command(version, about = "Watches a release channel and mails once per new release")]
struct Cli {
    /// Config file location (defaults to the XDG config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one check cycle: fetch, compare, announce, record
    Check,
    /// Show the observed and recorded releases without mailing or recording
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging();

    let config_path = cli.config.unwrap_or_else(config::config_path);
    let config = Config::load(&config_path)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            match cli.command {
                Command::Check => check(config).await,
                Command::Status => status(config).await,
            }
        })
}

fn init_logging() {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("release_watch=info"))
        .expect("Failed to create env filter");

    // Logs go to stderr so the outcome lines on stdout stay pipeable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn check(config: Config) -> anyhow::Result<()> {
    let source = ReleasePage::new(&config.source.url, config.source.include_prerelease);
    let store = FileStore::new(config.store.path());
    let mailer = SmtpMailer::new(config.smtp.clone());
    let notifier = Notifier::new(mailer, &config.notify, &config.source.artifact);

    match run_check(&source, &store, &notifier).await? {
        Outcome::UpToDate { observed, stored } => {
            println!("up to date (observed {observed}, recorded {stored})");
        }
        Outcome::Notified { previous, new } => {
            println!("notified {previous} -> {new}");
        }
    }

    Ok(())
}

async fn status(config: Config) -> anyhow::Result<()> {
    let source = ReleasePage::new(&config.source.url, config.source.include_prerelease);
    let store = FileStore::new(config.store.path());

    let stored = store.load();
    let observed = source.latest_release().await;

    println!("source: {}", config.source.url);
    println!("store: {}", store.path().display());
    println!("recorded: {stored}");
    println!("observed: {observed}");
    match observed.newer_than(&stored) {
        Some(version) => println!("pending: yes ({version})"),
        None => println!("pending: no"),
    }

    Ok(())
}
