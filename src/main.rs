mod api;
mod config;
mod database;
mod error;
mod logging;
mod security;
mod server;
mod users;

use crate::config::{Config, RawConfig};
use anyhow::anyhow;
use clap::{Arg, Command, crate_authors, crate_description, crate_version};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let matches = Command::new("keeperd")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("KEEPERD_CONFIG")
                .short('c')
                .long("config")
                .default_value("keeperd.toml")
                .help("Path to the server configuration file."),
        )
        .arg(
            Arg::new("ADDRESS")
                .env("KEEPERD_ADDRESS")
                .short('a')
                .long("address")
                .help("Address (host:port) to listen on."),
        )
        .get_matches();

    let mut raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    // CLI argument takes precedence.
    if let Some(address) = matches.get_one::<String>("ADDRESS") {
        raw_config.address = address.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&raw_config.log_level))?;
    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("keeperd raw configuration: {raw_config:?}.");

    server::run(Config::try_from(raw_config)?)
}
