// src/track/csv_log.rs
//! Tolerant import of logger CSV files
//!
//! Records look like `1658184839700,27797,51.872949,-8.582667,40.6,...`:
//! epoch milliseconds, a counter, latitude and longitude, then anything.

use crate::geo::{Location, Track, TrackPoint};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parse the four leading numeric fields of a CSV log record.
fn parse_record(record: &StringRecord) -> Option<(i64, i64, f64, f64)> {
    let epoch_ms = record.get(0)?.parse::<i64>().ok()?;
    let counter = record.get(1)?.parse::<i64>().ok()?;
    let latitude = record.get(2)?.parse::<f64>().ok()?;
    let longitude = record.get(3)?.parse::<f64>().ok()?;

    Some((epoch_ms, counter, latitude, longitude))
}

/// Read points from CSV records, silently skipping any record that does not
/// start with the four numeric fields.
pub fn read_csv<R: Read>(reader: R) -> Track {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut track = Track::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                warn!("Error reading CSV after {} points: {}", track.len(), e);
                break;
            }
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let parsed = parse_record(&record).and_then(|(epoch_ms, _counter, lat, lon)| {
            DateTime::<Utc>::from_timestamp_millis(epoch_ms).map(|time| (time, lat, lon))
        });

        match parsed {
            Some((timestamp, latitude, longitude)) => {
                let sequence = track.len();
                track.push(TrackPoint::new(Location::new(latitude, longitude), timestamp, sequence));
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unparsable CSV records", skipped);
    }

    track
}

/// Load a CSV log file. A file that cannot be opened gives an empty track.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Track {
    let path = path.as_ref();

    match File::open(path) {
        Ok(file) => read_csv(file),
        Err(e) => {
            warn!("Failed to open CSV file {}: {}", path.display(), e);
            Track::new()
        }
    }
}
