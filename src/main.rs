use std::path::PathBuf;

use clap::{Parser, Subcommand};

use litebin::commands;
use litebin::config::Config;
use litebin::App;

#[derive(Parser)]
#[command(version, about = "Ephemeral pastebin with per-paste expiry and view limits")]
struct Cli {
    /// Path to a TOML config file. Without it, `config.toml` is used when
    /// present and defaults otherwise.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve,
    /// Ping the paste store and exit non-zero when it is unreachable.
    CheckHealth,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // try to load .env, ignoring any errors
    _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let app = App::connect(config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => commands::serve::run(app).await,
        Command::CheckHealth => commands::check_health::run(app).await,
    }
}
