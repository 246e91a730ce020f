//! CLI application for receipt text parsing.

mod commands;
mod llm;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, process, receipts};

/// Receipt parser - Extract structured data from captured receipt pages
#[derive(Parser)]
#[command(name = "rcpt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the pages of one receipt
    Process(process::ProcessArgs),

    /// List stored receipts
    List(receipts::ListArgs),

    /// Show a stored receipt
    Show(receipts::ShowArgs),

    /// Delete a stored receipt
    Delete(receipts::DeleteArgs),

    /// File a stored receipt under a folder
    Move(receipts::MoveArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::List(args) => receipts::list(args, config_path),
        Commands::Show(args) => receipts::show(args, config_path),
        Commands::Delete(args) => receipts::delete(args, config_path),
        Commands::Move(args) => receipts::move_receipt(args, config_path),
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
