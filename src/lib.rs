pub mod cli;
pub mod codec;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use db::Store;
use models::LogRequest;
use services::{FlowLog, NoRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `general.log_level`. `general.log_format = "json"`
/// switches the fmt layer to JSON lines.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(())
}

pub async fn connect(config: &Config) -> anyhow::Result<FlowLog> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
    .context("Failed to open log database")?;

    Ok(FlowLog::new(store))
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Log {
            category,
            template,
            args,
            subject,
            severity,
        } => {
            let mut request = LogRequest::new(category, template)
                .args(args)
                .subject(subject);
            if let Some(severity) = severity {
                request = request.severity(severity);
            }
            cmd_log(&config, request).await
        }
        Commands::Show { subject_id } => cmd_show(&config, subject_id).await,
    }
}

async fn cmd_log(config: &Config, request: LogRequest) -> anyhow::Result<()> {
    let flow_log = connect(config).await?;
    let ctx = NoRequest::new(config.home_url()?);

    let id = flow_log.log(&ctx, request).await?;
    info!(id, "Entry recorded");
    println!("Recorded entry #{id}");
    Ok(())
}

async fn cmd_show(config: &Config, subject_id: i64) -> anyhow::Result<()> {
    let flow_log = connect(config).await?;
    let entries = flow_log.subject_logs(subject_id).await?;

    if entries.is_empty() {
        println!("No entries for subject {subject_id}");
        return Ok(());
    }

    for entry in entries {
        match entry {
            Ok(entry) => println!(
                "{}  [{:<7}] {:<16} {}",
                services::render::format_timestamp(entry.created_at),
                entry.severity,
                entry.category,
                entry.formatted_message
            ),
            Err(e) => println!("(unreadable entry: {e})"),
        }
    }

    Ok(())
}
