// src/display/mod.rs
//! Console output

pub mod terminal;

pub use terminal::{print_path_summary, SummaryDisplay};
