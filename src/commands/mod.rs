pub mod client;
pub mod entry;
pub mod export;
pub mod init;
pub mod product;
pub mod report;
pub mod timer;

use crate::libs::messages::macros::is_debug_mode;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage the client register")]
    Client(client::ClientArgs),
    #[command(about = "Manage the product register")]
    Product(product::ProductArgs),
    #[command(about = "Manage time entries")]
    Entry(entry::EntryArgs),
    #[command(about = "Control the work timer")]
    Timer(timer::TimerArgs),
    #[command(about = "Show daily or monthly reports")]
    Report(report::ReportArgs),
    #[command(about = "Export invoice basis")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        if is_debug_mode() {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }

        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args).await,
            Commands::Client(args) => client::cmd(args).await,
            Commands::Product(args) => product::cmd(args).await,
            Commands::Entry(args) => entry::cmd(args).await,
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Report(args) => report::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
        }
    }
}
