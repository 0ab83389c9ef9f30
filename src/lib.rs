#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod core;
pub mod ops;
mod prelude;
pub mod quantity;
