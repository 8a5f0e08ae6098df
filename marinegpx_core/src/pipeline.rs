use std::path::Path;

use anyhow::Result;
use log::info;
use logging_timer::time;

use crate::{
    config::GraphConfig,
    kinematics::{derive_speed, smooth_speed},
    model::{TimeUnit, Track},
    projection::project_points,
    read::{read_track_from_file, read_track_from_slice},
};

/// Loads a track file and fills in the planar offsets, speeds and smoothed
/// speeds of every point. Any failure aborts the load; there is no partial
/// Track.
#[time]
pub fn load_track<P: AsRef<Path>>(input_file: P, config: &GraphConfig) -> Result<Track> {
    config.validate()?;
    let track = read_track_from_file(input_file)?;
    enrich_track(track, config)
}

pub fn load_track_from_slice(data: &[u8], config: &GraphConfig) -> Result<Track> {
    config.validate()?;
    let track = read_track_from_slice(data)?;
    enrich_track(track, config)
}

/// Runs the projector and then the kinematics over a freshly read track.
pub fn enrich_track(mut track: Track, config: &GraphConfig) -> Result<Track> {
    project_points(&mut track.points);
    derive_speed(&mut track.points);
    smooth_speed(&mut track.points, config.window)?;

    let total = track.total_elapsed_seconds();
    let unit = TimeUnit::Auto.resolve(total);
    info!(
        "Track elapsed time is: {:.3} {unit}",
        total / unit.seconds_per_unit()
    );
    info!(
        "Track {:?} loaded: {} points, {:.2} NM, max speed {:.2} kn (smoothed {:.2} kn)",
        track.label(),
        track.points.len(),
        track.total_distance(),
        track.max_speed(),
        track.max_smoothed_speed()
    );

    Ok(track)
}
