// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! FrogCrypto - rate-limited randomized reward feeds.
//!
//! This is the binary entry point for the FrogCrypto feed service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use frogcrypto_auth::Keypair;
use frogcrypto_config::FrogCryptoConfig;

/// FrogCrypto - rate-limited randomized reward feeds.
#[derive(Parser, Debug)]
#[command(name = "frogcrypto", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file only, instead of the search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API (default).
    Serve,
    /// Load and validate configuration, then exit.
    CheckConfig,
    /// Print a fresh Ed25519 keypair for `issuer_key_hex` or an admin identity.
    Keygen,
}

fn load_config(path: Option<&PathBuf>) -> FrogCryptoConfig {
    let loaded = match path {
        Some(path) => frogcrypto_config::load_and_validate_path(path),
        None => frogcrypto_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            frogcrypto_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = load_config(cli.config.as_ref());
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("frogcrypto: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            let config = load_config(cli.config.as_ref());
            println!(
                "frogcrypto: config ok (listen {}:{}, database {}, {} admin identities)",
                config.server.host,
                config.server.port,
                config.storage.database_path,
                config.frogcrypto.admin_identities.len()
            );
            match frogcrypto_config::to_redacted_toml(&config) {
                Ok(rendered) => print!("\n{rendered}"),
                Err(e) => eprintln!("frogcrypto: could not render config: {e}"),
            }
        }
        Commands::Keygen => {
            let keypair = Keypair::generate();
            println!("private: {}", keypair.private_hex());
            println!("public:  {}", keypair.public_hex());
        }
    }
}
