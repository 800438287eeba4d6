//! cvm - Cordova Version Manager CLI

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "cvm")]
#[command(author, version, about = "cvm - manage side-by-side cordova installations")]
struct Cli {
    /// Show debug-level detail while running
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed versions, or published ones with `available`
    #[command(visible_alias = "ls")]
    List {
        /// Pass `available` to query the registry instead of the root
        #[arg(value_parser = ["available"])]
        scope: Option<String>,
    },
    /// Download a version and install its dependencies
    Install {
        /// Version identifier, or `latest`
        version: String,
    },
    /// Remove an installed version
    Uninstall {
        /// Version identifier
        version: String,
    },
    /// Activate an installed version globally
    Use {
        /// Version identifier
        version: String,
    },
    /// Switch management on, activating the best known version
    On,
    /// Switch management off, restoring any system install
    Off,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; --verbose widens the default filter
    let default_filter = if cli.verbose { "cvm=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let outcome = match cli.command {
        Commands::List { scope } => cmd::list::list(scope.as_deref() == Some("available")).await,
        Commands::Install { version } => cmd::install::install(&version).await,
        Commands::Uninstall { version } => cmd::uninstall::uninstall(&version).await,
        Commands::Use { version } => cmd::r#use::use_version(&version).await,
        Commands::On => cmd::on::on().await,
        Commands::Off => cmd::off::off().await,
    };

    if let Err(err) = outcome {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
