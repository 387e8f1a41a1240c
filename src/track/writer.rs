// src/track/writer.rs
//! Minimal GPX track writer

use crate::error::{Result, TrackError};
use crate::geo::TrackPoint;
use crate::time::format_utc;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const SIGNIFICANT_DIGITS: usize = 10;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<gpx version="1.1" creator="gps-path-tools" xmlns="http://www.topografix.com/GPX/1/1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">
<metadata>
</metadata>
<trk>
<trkseg>
"#;

const FOOTER: &str = "</trkseg>
</trk>
</gpx>
";

/// Stream the header, one block per point and the footer to `writer`.
///
/// No escaping or validation is done beyond number formatting.
fn write_points<W: Write>(writer: &mut W, points: &[TrackPoint]) -> io::Result<()> {
    writer.write_all(HEADER.as_bytes())?;

    for point in points {
        writeln!(
            writer,
            "<trkpt lat=\"{}\" lon=\"{}\">",
            format_significant(point.location.latitude, SIGNIFICANT_DIGITS),
            format_significant(point.location.longitude, SIGNIFICANT_DIGITS)
        )?;
        writeln!(
            writer,
            "<ele>{}</ele>",
            format_significant(point.location.elevation, SIGNIFICANT_DIGITS)
        )?;
        writeln!(writer, "<time>{}</time>", format_utc(&point.timestamp))?;
        writer.write_all(b"</trkpt>\n")?;
    }

    writer.write_all(FOOTER.as_bytes())
}

/// Render `points` as a single-segment GPX document.
pub fn to_gpx(points: &[TrackPoint]) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec does not fail.
    let _ = write_points(&mut buffer, points);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write `points` to `writer`; an empty range is an error.
pub fn write_track<W: Write>(writer: &mut W, points: &[TrackPoint]) -> Result<()> {
    if points.is_empty() {
        return Err(TrackError::EmptyTrack);
    }

    write_points(writer, points)?;
    writer.flush()?;
    Ok(())
}

/// Save `points` as a GPX file at `path`.
pub fn save_track<P: AsRef<Path>>(path: P, points: &[TrackPoint]) -> Result<()> {
    let path = path.as_ref();

    if points.is_empty() {
        return Err(TrackError::EmptyTrack);
    }

    let file = File::create(path).map_err(TrackError::Io)?;
    let mut writer = BufWriter::new(file);
    write_track(&mut writer, points)?;

    info!("Wrote {} points to {}", points.len(), path.display());
    Ok(())
}

/// Format like C's `%.<digits>g`: shortest of fixed or scientific
/// notation with trailing zeros removed.
fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= digits as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
