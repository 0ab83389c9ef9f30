#![allow(clippy::doc_markdown)]

mod cli;
mod tables;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, hunt, prelude::*};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Hunt(args) => {
            hunt(&args)?;
        }
    }

    info!("done!");
    Ok(())
}
