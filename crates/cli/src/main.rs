//! Pocket Shop CLI - Accounts, cart, and purchase history from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Open an interactive shop session
//! pocket-shop shell
//!
//! # List registered users
//! pocket-shop users
//!
//! # Use another data directory
//! pocket-shop --data-dir /tmp/shop shell
//! ```
//!
//! # Commands
//!
//! - `shell` - Interactive session (register, login, cart, checkout, history)
//! - `users` - List registered users
//!
//! Configuration is read from the environment (see
//! [`ShopConfig`](pocket_shop_storefront::config::ShopConfig)); logs go to
//! stderr so shell output stays clean.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pocket_shop_storefront::config::{LogFormat, ShopConfig};
use pocket_shop_storefront::{AppError, ShopState};

mod commands;

#[derive(Parser)]
#[command(name = "pocket-shop")]
#[command(author, version, about = "Pocket Shop accounts, cart, and purchase history")]
struct Cli {
    /// Directory holding durable storage (overrides `POCKET_SHOP_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive shop session
    Shell,
    /// List registered users
    Users,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = ShopConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        if e.is_data_corruption() {
            tracing::error!("Stored data could not be read: {e}");
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

/// Install the tracing subscriber on stderr.
///
/// Defaults to info for the CLI and warn for the storefront library if
/// `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pocket_shop_cli=info,pocket_shop_storefront=warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(cli: Cli, mut config: ShopConfig) -> Result<(), AppError> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let state = ShopState::open(config)?;

    match cli.command {
        Commands::Shell => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::shell::run(&state, stdin.lock(), stdout.lock()).await?;
        }
        Commands::Users => {
            let count = commands::users::list(&state, std::io::stdout().lock())?;
            tracing::info!("{count} registered user(s)");
        }
    }
    Ok(())
}
