// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Mixtape.
//!
//! A command-line music-library manager.
//!
//! Songs live in a local SQLite database and can be grouped into ordered
//! playlists, reordered, and totalled up. Each invocation parses one
//! subcommand, opens the database, runs the operation through the
//! [`library::Library`] facade, and prints the result.
//!
//! ## Architecture
//!
//! * **CLI** ([`commands`]): clap subcommands, the only layer that prints.
//! * **Facade** ([`library`]): validation, error translation, aggregate
//!   refresh after mutations.
//! * **Data access** ([`db`]): per-entity repositories, the ordered
//!   membership store, and on-demand aggregation over SQLite.

mod commands;
mod config;
mod db;
mod error;
mod library;
mod model;
mod util;

use anyhow::{Context, Result};
use clap::Parser;

use crate::library::Library;

/// Options configurable via the CLI.
#[derive(Debug, Parser)]
#[command(name = "mixtape", version = env!("CARGO_PKG_VERSION"), about)]
struct Flags {
    /// Override the configured database file
    #[clap(long)]
    database: Option<String>,
    /// Subcommand to run
    #[clap(subcommand)]
    command: commands::Command,
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Flags::command().debug_assert();
}

/// The entry point of the application.
///
/// Initialises logging, loads the configuration, opens the database, and
/// dispatches the parsed subcommand.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let flags = Flags::parse();
    let config = config::load_config();

    let database_file = flags
        .database
        .unwrap_or_else(|| config.database_file.clone());

    let conn = db::init_db(&database_file)
        .with_context(|| format!("Failed to open database {database_file}"))?;
    let mut library = Library::new(conn);

    commands::run(&mut library, &config, flags.command)
}
