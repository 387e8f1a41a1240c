// src/main.rs
//! GPS Path Tools - track summaries, searches and conversions from the command line

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use gps_path_tools::{
    config::ToolsConfig,
    display::print_path_summary,
    geo::{distance, Location, PathValue},
    path,
    time::{duration_seconds, format_utc},
    track::{load_csv, load_track, save_track},
    Track, TrackPoint,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gps-path-tools", version, about = "Geodesic metrics for GPX tracks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print point count, times, distance and mean speed
    Summary {
        file: PathBuf,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the first stationary segment
    Stationary {
        file: PathBuf,
        /// Radius in metres (defaults to config)
        #[arg(long)]
        radius: Option<f64>,
        /// Minimum duration in seconds (defaults to config)
        #[arg(long)]
        min_duration: Option<i64>,
    },
    /// Find the track point closest to a location
    Closest {
        file: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Find the track point farthest from the start
    Farthest { file: PathBuf },
    /// Print the bounding box, optionally saving the track with its outline
    Bbox {
        file: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a derived series as CSV
    Series {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = SeriesKind::Speed)]
        kind: SeriesKind,
        /// Number of smoothing passes (defaults to config)
        #[arg(long)]
        smooth: Option<usize>,
    },
    /// Convert a logger CSV file to GPX
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Leading points to drop
        #[arg(long, default_value_t = 0)]
        skip: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SeriesKind {
    Heading,
    Speed,
    Distance,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ToolsConfig::load().unwrap_or_else(|e| {
        log::warn!("Using default configuration: {}", e);
        ToolsConfig::default()
    });

    match cli.command {
        Command::Summary { file, json } => {
            let track = load(&file)?;
            if json {
                let summary = path::generate_path_summary(&track);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_path_summary(&track, &config)?;
            }
        }
        Command::Stationary {
            file,
            radius,
            min_duration,
        } => {
            let track = load(&file)?;
            let radius = radius.unwrap_or(config.stationary_radius_m);
            let min_duration = min_duration.unwrap_or(config.stationary_min_duration_s);

            match path::find_stationary_points(&track, radius, min_duration) {
                Some((start, end)) => {
                    let (from, to) = (&track[start], &track[end]);
                    println!("Stationary near {}", from.location);
                    println!("From: {}", format_utc(&from.timestamp));
                    println!("To: {}", format_utc(&to.timestamp));
                    println!(
                        "For a time of {} seconds.",
                        duration_seconds(&from.timestamp, &to.timestamp)
                    );
                }
                None => println!("No stationary segment found."),
            }
        }
        Command::Closest { file, lat, lon } => {
            let track = load(&file)?;
            let target = Location::new(lat, lon);
            let search = &track[..config.closest_search_len(track.len())];

            match path::find_closest_path_point(search, &target) {
                Some(index) => {
                    let closest = &track[index];
                    println!(
                        "The closest point to {} is #{} at {}, {:.1}m away ({})",
                        target,
                        index,
                        closest.location,
                        distance(&closest.location, &target),
                        format_utc(&closest.timestamp)
                    );
                }
                None => println!("No points searched."),
            }
        }
        Command::Farthest { file } => {
            let track = load(&file)?;
            let start = track[0].location;

            if let Some(index) = path::find_farthest_point(&track, &start) {
                let farthest = &track[index];
                println!(
                    "The farthest point from the start is #{} at {}, {:.1}m away.",
                    index,
                    farthest.location,
                    distance(&start, &farthest.location)
                );
            }
        }
        Command::Bbox { file, output } => {
            let mut track = load(&file)?;
            let bbox = path::axis_aligned_bounding_box(&track);

            println!(
                "Bounding box NW: {}, SE: {}, NS length: {:.1}m, WE length: {:.1}m",
                bbox.nw,
                bbox.se,
                distance(&bbox.nw, &bbox.sw),
                distance(&bbox.nw, &bbox.ne)
            );

            if let Some(output) = output {
                let next = track.len();
                track.extend(
                    bbox.outline()
                        .iter()
                        .enumerate()
                        .map(|(i, corner)| TrackPoint { sequence: next + i, ..TrackPoint::at(*corner) }),
                );
                save_track(&output, &track)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            }
        }
        Command::Series { file, kind, smooth } => {
            let track = load(&file)?;
            let mut values = match kind {
                SeriesKind::Heading => path::path_heading(&track),
                SeriesKind::Speed => path::path_speed(&track),
                SeriesKind::Distance => path::path_cumulative_distance(&track),
            };

            for _ in 0..smooth.unwrap_or(config.smoothing_passes) {
                values = path::smooth(&values);
            }

            print_series(&values)?;
        }
        Command::Convert { input, output, skip } => {
            let track = load_csv(&input);
            let points = track.get(skip..).unwrap_or_default();

            save_track(&output, points)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {} points to {}", points.len(), output.display());
        }
    }

    Ok(())
}

/// Load a track, treating an empty result as an error for the CLI
fn load(file: &Path) -> anyhow::Result<Track> {
    let track = load_track(file);
    if track.is_empty() {
        bail!("No track points found in {}", file.display());
    }
    Ok(track)
}

fn print_series(values: &[PathValue]) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    writer.write_record(["time", "value"])?;
    for value in values {
        writer.write_record([format_utc(&value.timestamp), value.value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
