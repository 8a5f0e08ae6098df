//! Loading marks (named waypoints such as buoys and committee boats) from
//! one or more secondary files and placing them in a track's frame.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use logging_timer::time;

use crate::{
    config::GraphConfig,
    model::{Track, Waypoint, WaypointKey},
    projection::Origin,
    read::{read_marks_from_file, MarkFile},
};

/// What happened to one mark file.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkFileOutcome {
    Loaded {
        /// Complete waypoints found in the file, before deduplication and
        /// filtering.
        accepted: usize,
        /// Incomplete waypoints that were skipped.
        dropped: usize,
    },
    /// The file could not be read or was not well-formed, and was skipped.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkFileReport {
    pub path: PathBuf,
    pub outcome: MarkFileOutcome,
}

/// The marks that survived loading, deduplication and filtering, all
/// projected into the frame of the track they were loaded against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkSet {
    pub waypoints: Vec<Waypoint>,
    /// One entry per input file, in input order.
    pub reports: Vec<MarkFileReport>,
}

impl MarkSet {
    /// Total number of incomplete waypoints skipped across all files.
    pub fn total_dropped(&self) -> usize {
        self.reports
            .iter()
            .map(|r| match r.outcome {
                MarkFileOutcome::Loaded { dropped, .. } => dropped,
                MarkFileOutcome::Failed(_) => 0,
            })
            .sum()
    }

    /// Number of files that were skipped entirely.
    pub fn failed_files(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, MarkFileOutcome::Failed(_)))
            .count()
    }
}

/// Loads every mark file in order. A file that cannot be read is logged and
/// skipped; it does not stop the others from loading.
#[time]
pub fn load_marks<P: AsRef<Path>>(files: &[P], track: &Track, config: &GraphConfig) -> MarkSet {
    let mut mark_files = Vec::with_capacity(files.len());
    let mut reports = Vec::with_capacity(files.len());

    for f in files {
        let path = f.as_ref().to_owned();
        match read_marks_from_file(&path) {
            Ok(mf) => {
                info!(
                    "Read {} marks from {:?} ({} dropped)",
                    mf.waypoints.len(),
                    path,
                    mf.dropped
                );
                reports.push(MarkFileReport {
                    path,
                    outcome: MarkFileOutcome::Loaded {
                        accepted: mf.waypoints.len(),
                        dropped: mf.dropped,
                    },
                });
                mark_files.push(mf);
            }
            Err(e) => {
                warn!("Skipping mark file {:?}: {e:#}", path);
                reports.push(MarkFileReport {
                    path,
                    outcome: MarkFileOutcome::Failed(format!("{e:#}")),
                });
            }
        }
    }

    MarkSet {
        waypoints: place_marks(mark_files, track, config),
        reports,
    }
}

/// Deduplicates the marks across all files, filters them by the track's
/// bounds if asked to, and projects the survivors using the track's
/// origin.
pub fn place_marks<I>(mark_files: I, track: &Track, config: &GraphConfig) -> Vec<Waypoint>
where
    I: IntoIterator<Item = MarkFile>,
{
    let mut seen: HashSet<WaypointKey> = HashSet::new();
    let mut waypoints: Vec<Waypoint> = mark_files
        .into_iter()
        .flat_map(|mf| mf.waypoints)
        .filter(|wpt| seen.insert(wpt.key()))
        .collect();
    let unique = waypoints.len();

    if config.filter_marks {
        if track.bounds.is_none() {
            warn!("Track declares no bounds, filtering marks by the extent of its points");
        }

        match track.effective_bounds() {
            Some(bounds) => waypoints.retain(|wpt| bounds.strictly_contains(wpt.lat, wpt.lon)),
            None => waypoints.clear(),
        }
        debug!(
            "Kept {} of {} unique marks inside the track bounds",
            waypoints.len(),
            unique
        );
    }

    if let Some(first) = track.points.first() {
        let origin = Origin::new(first.lat, first.lon);
        for wpt in waypoints.iter_mut() {
            (wpt.north_offset, wpt.east_offset) = origin.project(wpt.lat, wpt.lon);
        }
    }

    info!("{} marks placed on track {:?}", waypoints.len(), track.label());
    waypoints
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{Bounds, TrackPoint},
        projection::project_points,
        time_format::TimeFormat,
    };

    use super::*;

    fn track() -> Track {
        let mut points = vec![
            TrackPoint::new(50.1, -1.2, 0.0),
            TrackPoint::new(50.5, -1.0, 600.0),
        ];
        project_points(&mut points);

        Track {
            filename: None,
            name: Some("Race 1".into()),
            recorded_at: None,
            bounds: Some(Bounds {
                min_lat: 50.0,
                min_lon: -1.5,
                max_lat: 51.0,
                max_lon: -0.5,
            }),
            segment_count: 1,
            time_format: TimeFormat::WholeUtc,
            points,
        }
    }

    fn mark_file(waypoints: Vec<Waypoint>) -> MarkFile {
        MarkFile {
            waypoints,
            dropped: 0,
        }
    }

    #[test]
    fn duplicates_across_files_collapse_to_one() {
        let a = mark_file(vec![Waypoint::new(50.2, -1.1, "Windward")]);
        let b = mark_file(vec![
            Waypoint::new(50.2, -1.1, "Windward"),
            Waypoint::new(50.2, -1.1, "Leeward"),
        ]);

        let placed = place_marks([a, b], &track(), &GraphConfig::default());

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].name, "Windward");
        assert_eq!(placed[1].name, "Leeward");
    }

    #[test]
    fn marks_on_the_bounds_edge_are_excluded() {
        let mf = mark_file(vec![
            Waypoint::new(51.0, -1.0, "On max lat"),
            Waypoint::new(50.0, -1.0, "On min lat"),
            Waypoint::new(50.5, -1.5, "On min lon"),
            Waypoint::new(50.5, -0.5, "On max lon"),
            Waypoint::new(50.5, -1.0, "Inside"),
            Waypoint::new(52.0, -1.0, "Outside"),
        ]);

        let placed = place_marks([mf], &track(), &GraphConfig::default());

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].name, "Inside");
    }

    #[test]
    fn filtering_can_be_turned_off() {
        let mf = mark_file(vec![
            Waypoint::new(51.0, -1.0, "On max lat"),
            Waypoint::new(52.0, -1.0, "Outside"),
        ]);
        let config = GraphConfig {
            filter_marks: false,
            ..Default::default()
        };

        let placed = place_marks([mf], &track(), &config);

        assert_eq!(placed.len(), 2);
    }

    #[test]
    fn without_declared_bounds_the_point_envelope_is_used() {
        let mut t = track();
        t.bounds = None;
        let mf = mark_file(vec![
            Waypoint::new(50.3, -1.1, "Inside"),
            Waypoint::new(50.05, -1.1, "Below the first point"),
        ]);

        let placed = place_marks([mf], &t, &GraphConfig::default());

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].name, "Inside");
    }

    #[test]
    fn marks_share_the_track_origin() {
        let t = track();
        let mf = mark_file(vec![
            Waypoint::new(50.5, -1.0, "Same place as point 1"),
            Waypoint::new(50.1, -1.2, "Same place as point 0"),
        ]);
        let config = GraphConfig {
            filter_marks: false,
            ..Default::default()
        };

        let placed = place_marks([mf], &t, &config);

        assert!((placed[0].north_offset - t.points[1].north_offset).abs() < 1e-12);
        assert!((placed[0].east_offset - t.points[1].east_offset).abs() < 1e-12);
        assert_eq!(placed[1].north_offset, 0.0);
        assert_eq!(placed[1].east_offset, 0.0);
    }
}
