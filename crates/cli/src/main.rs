use anyhow::Result;
use clap::{Parser, Subcommand};
use natura_core::DEFAULT_DATABASE_URL;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::serve::ServeArgs;

#[derive(Parser)]
#[command(name = "natura")]
#[command(about = "Plant identification and collection server", long_about = None)]
#[command(version)]
struct Cli {
    /// Database URL (`sqlite://...` or `postgres://...`)
    #[arg(long, env = "NATURA_DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(Box<ServeArgs>),
    /// Create or upgrade the database schema and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(&cli.database_url, *args).await?,
        Commands::Migrate => commands::migrate::run(&cli.database_url).await?,
    }

    Ok(())
}
