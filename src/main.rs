use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{LogFormat, LogSettings, Settings, load_settings};
use database::{DbRepository, connect, run_migrations, seed_database};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// The main entry point for the superheroes API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        settings.log.format = format;
    }

    // Held until exit so buffered file logs are flushed.
    let _guard = init_tracing(&settings.log)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Migrate => handle_migrate(&settings).await,
        Commands::Seed => handle_seed(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small REST API over heroes, powers and the links between them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file. Missing files are ignored.
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides `log.format` from the settings.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and run the HTTP server.
    Serve(ServeArgs),
    /// Apply database migrations and exit.
    Migrate,
    /// Replace all data with the sample roster.
    Seed,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.port` from the settings.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    web_server::run_server(&settings).await
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let db_pool = connect(&settings.database).await?;
    run_migrations(&db_pool).await?;
    tracing::info!(url = %settings.database.url, "Schema is up to date.");
    Ok(())
}

async fn handle_seed(settings: &Settings) -> anyhow::Result<()> {
    let db_pool = connect(&settings.database).await?;
    run_migrations(&db_pool).await?;
    let report = seed_database(&DbRepository::new(db_pool)).await?;
    tracing::info!(
        heroes = report.heroes,
        powers = report.powers,
        hero_powers = report.hero_powers,
        url = %settings.database.url,
        "Database seeded."
    );
    Ok(())
}

/// Installs the global subscriber: stdout in the configured format, plus a
/// daily-rolling file when `log.directory` is set. `RUST_LOG` overrides the
/// configured filter.
fn init_tracing(log: &LogSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .context("invalid log filter")?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(match log.format {
        LogFormat::Text => fmt::layer().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    });

    let guard = match &log.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "superheroes.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(fmt::layer().with_writer(writer).with_ansi(false).boxed());
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(guard)
}
