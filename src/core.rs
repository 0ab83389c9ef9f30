pub mod battery;
pub mod controller;
pub mod cost;
pub mod error;
pub mod interval;
pub mod scenario;
pub mod schedule;
mod soc_grid;
mod solution_space;
pub mod solver;
pub mod synthesizer;
pub mod trajectory;

pub use self::error::Error;
