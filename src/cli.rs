pub mod battery;
mod hunt;
pub mod prelude;
mod solver;
mod synthesizer;

use clap::{Parser, Subcommand};

pub use self::hunt::hunt;
use crate::cli::hunt::HuntArgs;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: find the optimal trajectory and the schedule that reproduces it.
    #[clap(name = "hunt")]
    Hunt(Box<HuntArgs>),
}
