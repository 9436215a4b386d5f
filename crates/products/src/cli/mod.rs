//! # CLI Layer
//!
//! The binary only wires things together: parse arguments, resolve
//! configuration, install logging, and hand off to a command.
//!
//! ## Configuration Precedence
//!
//! Flags > `PRODUCTS_*` environment variables > config file > defaults.
//! [`ProductsConfig::load`] handles the lower three layers; flags are applied
//! on top in [`apply_overrides`].
//!
//! ## Commands
//!
//! - `products` / `products serve`: run the HTTP server.
//! - `products init`: write an empty collection document if none exists.

mod commands;
mod logging;
pub mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use productsapp::config::ProductsConfig;
use setup::{Cli, Commands};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or_else(Commands::default_command);

    let mut config = ProductsConfig::load(cli.config.as_deref()).context("loading configuration")?;
    apply_overrides(&mut config, &cli, &command);

    logging::init(&config.log.filter, cli.verbose);
    tracing::debug!(?config, "resolved configuration");

    match command {
        Commands::Serve { .. } => commands::serve(&config),
        Commands::Init => commands::init(&config),
    }
}

fn apply_overrides(config: &mut ProductsConfig, cli: &Cli, command: &Commands) {
    if let Some(data_file) = &cli.data_file {
        config.storage.data_file = data_file.clone();
    }

    if let Commands::Serve {
        bind,
        static_dir,
        create_if_missing,
    } = command
    {
        if let Some(bind) = bind {
            config.server.bind = bind.clone();
        }
        if let Some(dir) = static_dir {
            config.server.static_dir = Some(dir.clone());
        }
        if *create_if_missing {
            config.storage.create_if_missing = true;
        }
    }
}
