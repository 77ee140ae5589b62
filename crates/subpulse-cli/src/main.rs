mod run;
mod status;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use subpulse_core::load_app_config;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "subpulse")]
#[command(about = "Community sentiment harvesting, aggregation, and trends")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest all configured communities, aggregate, reconcile trends, and upsert
    Run {
        /// Harvest and aggregate, but skip all database writes
        #[arg(long)]
        dry_run: bool,
    },
    /// Show recently stored daily summaries
    Status {
        /// Filter to a specific community
        #[arg(long)]
        community: Option<String>,

        /// Maximum rows to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Verify database connectivity
    Ping,
}

/// Build the tracing filter: `RUST_LOG` wins, then the configured level,
/// then `info`.
fn log_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_tracing(default_level: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(rust_log.as_deref(), default_level);
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_app_config()?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Run { dry_run } => {
            let reddit = config.require_reddit()?.clone();
            if !dry_run {
                config.require_database_url()?;
            }
            let stats = run::run_pipeline(&config, &reddit, dry_run).await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Status { community, limit } => {
            let pool = subpulse_db::connect_pool(
                config.require_database_url()?,
                subpulse_db::PoolConfig::from_app_config(&config),
            )
            .await?;
            status::run_status(&pool, community.as_deref(), limit).await?;
        }
        Commands::Db { command } => {
            let pool = subpulse_db::connect_pool(
                config.require_database_url()?,
                subpulse_db::PoolConfig::from_app_config(&config),
            )
            .await?;
            match command {
                DbCommands::Migrate => {
                    subpulse_db::run_migrations(&pool).await?;
                    println!("migrations applied");
                }
                DbCommands::Ping => {
                    subpulse_db::ping(&pool).await?;
                    println!("database ok");
                }
            }
        }
    }

    Ok(())
}
