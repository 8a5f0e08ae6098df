use std::io::Write;

use anyhow::Result;
use marinegpx_core::{
    marks::{MarkFileOutcome, MarkSet},
    model::{TimeUnit, Track},
};

/// Writes a plain-text account of the track and its marks. Elapsed time is
/// shown in `unit`, resolved against the length of the track.
pub fn write_summary<W: Write>(w: &mut W, track: &Track, marks: &MarkSet, unit: TimeUnit) -> Result<()> {
    let elapsed = track.elapsed_in(unit).last().copied().unwrap_or_default();
    let unit = unit.resolve(track.total_elapsed_seconds());

    writeln!(w, "Track:          {}", track.label())?;
    if let Some(t) = &track.recorded_at {
        writeln!(w, "Recorded at:    {t}")?;
    }
    writeln!(w, "Time format:    {}", track.time_format)?;
    writeln!(w, "Points:         {}", track.points.len())?;
    writeln!(w, "Elapsed:        {elapsed:.2} {unit}")?;
    writeln!(w, "Distance:       {:.2} NM", track.total_distance())?;
    writeln!(w, "Max speed:      {:.2} kn", track.max_speed())?;
    writeln!(w, "Max smoothed:   {:.2} kn", track.max_smoothed_speed())?;

    for report in &marks.reports {
        match &report.outcome {
            MarkFileOutcome::Loaded { accepted, dropped } => writeln!(
                w,
                "Mark file {:?}: {accepted} marks, {dropped} dropped",
                report.path
            )?,
            MarkFileOutcome::Failed(msg) => {
                writeln!(w, "Mark file {:?}: skipped ({msg})", report.path)?
            }
        }
    }

    if !marks.waypoints.is_empty() {
        writeln!(w)?;
        writeln!(w, "{:<24} {:>10} {:>10}", "Mark", "North NM", "East NM")?;
        for wpt in &marks.waypoints {
            writeln!(
                w,
                "{:<24} {:>10.3} {:>10.3}",
                wpt.name, wpt.north_offset, wpt.east_offset
            )?;
        }
    }

    Ok(())
}
