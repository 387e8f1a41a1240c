// src/display/terminal.rs
//! Console rendering of a path summary

use crate::{
    config::ToolsConfig,
    error::{Result, TrackError},
    geo::{math::cardinal_direction, TrackPoint},
    path::{find_stationary_points, generate_path_summary, path_heading},
    time::{duration_to_string, format_utc},
};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::Write;

pub struct SummaryDisplay {
    stationary_radius_m: f64,
    stationary_min_duration_s: i64,
}

impl SummaryDisplay {
    pub fn new() -> Self {
        Self::from_config(&ToolsConfig::default())
    }

    pub fn from_config(config: &ToolsConfig) -> Self {
        Self {
            stationary_radius_m: config.stationary_radius_m,
            stationary_min_duration_s: config.stationary_min_duration_s,
        }
    }

    /// Render the summary of `points` to `out`
    pub fn render(&self, out: &mut impl Write, points: &[TrackPoint]) -> Result<()> {
        let summary = generate_path_summary(points);

        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        ).map_err(TrackError::Io)?;

        execute!(out, Print(format!("Number of points: {}\n", summary.points)))
            .map_err(TrackError::Io)?;

        if summary.points < 2 {
            return Ok(());
        }

        execute!(
            out,
            Print(format!("Start Time: {}\n", summary.start_time)),
            Print(format!("End Time: {}\n", summary.end_time)),
            Print(format!(
                "Duration: {}s ({})\n",
                summary.duration_s,
                duration_to_string(&points[0].timestamp, &points[points.len() - 1].timestamp)
            )),
            Print(format!("Distance: {:.1}m\n", summary.distance_m)),
            Print(format!("Mean Speed: {:.1}kph\n", summary.mean_speed_kph))
        ).map_err(TrackError::Io)?;

        self.render_direction(out, points)?;
        self.render_stationary(out, points)?;

        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        ).map_err(TrackError::Io)?;

        Ok(())
    }

    fn render_direction(&self, out: &mut impl Write, points: &[TrackPoint]) -> Result<()> {
        if let Some(first) = path_heading(points).first() {
            execute!(
                out,
                Print(format!(
                    "Initial Heading: {:.1} deg ({})\n",
                    first.value,
                    cardinal_direction(first.value)
                ))
            ).map_err(TrackError::Io)?;
        }
        Ok(())
    }

    fn render_stationary(&self, out: &mut impl Write, points: &[TrackPoint]) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "STATIONARY (within {}m for over {}s):\n",
                self.stationary_radius_m, self.stationary_min_duration_s
            )),
            ResetColor
        ).map_err(TrackError::Io)?;

        match find_stationary_points(points, self.stationary_radius_m, self.stationary_min_duration_s) {
            Some((start, end)) => {
                let (from, to) = (&points[start], &points[end]);
                execute!(
                    out,
                    Print(format!("  Near: {}\n", from.location)),
                    Print(format!("  From: {}\n", format_utc(&from.timestamp))),
                    Print(format!("  To:   {}\n", format_utc(&to.timestamp)))
                ).map_err(TrackError::Io)?;
            }
            None => {
                execute!(out, Print("  None found\n")).map_err(TrackError::Io)?;
            }
        }

        Ok(())
    }
}

impl Default for SummaryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the summary of `points` to stdout
pub fn print_path_summary(points: &[TrackPoint], config: &ToolsConfig) -> Result<()> {
    let mut stdout = std::io::stdout();
    SummaryDisplay::from_config(config).render(&mut stdout, points)?;
    stdout.flush().map_err(TrackError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Location;
    use crate::time::parse_utc;

    fn render(points: &[TrackPoint]) -> String {
        let mut out = Vec::new();
        SummaryDisplay::new().render(&mut out, points).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn test_render_short_path() {
        let text = render(&[]);
        assert!(text.contains("Number of points: 0"));
        assert!(!text.contains("Start Time"));
    }

    #[test]
    fn test_render_summary() {
        let points = [
            TrackPoint::new(Location::new(52.9827588546699, -6.040081945988319), parse_utc("2022-05-07T10:00:00Z").unwrap(), 0),
            TrackPoint::new(Location::new(53.057744464984495, -6.040085910508501), parse_utc("2022-05-07T11:00:00Z").unwrap(), 1),
        ];
        let text = render(&points);

        assert!(text.contains("Number of points: 2"));
        assert!(text.contains("Start Time: 2022-05-07T10:00:00.000000Z"));
        assert!(text.contains("Duration: 3600s (1:00:00)"));
        assert!(text.contains("Mean Speed: 8.3kph"));
        assert!(text.contains("deg (N)"));
        assert!(text.contains("None found"));
    }
}
