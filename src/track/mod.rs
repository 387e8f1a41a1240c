// src/track/mod.rs
//! Track file input and output

pub mod csv_log;
pub mod reader;
pub mod writer;

pub use csv_log::{load_csv, read_csv};
pub use reader::{decode_str, decode_track, load_track, TrackDecoder};
pub use writer::{save_track, to_gpx, write_track};
