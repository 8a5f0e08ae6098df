use std::path::PathBuf;

use marinegpx_core::{
    config::GraphConfig,
    error::GraphError,
    marks::{load_marks, place_marks, MarkFileOutcome},
    pipeline::load_track,
    read::{read_marks_from_file, read_marks_from_slice},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn names(marks: &marinegpx_core::marks::MarkSet) -> Vec<&str> {
    marks.waypoints.iter().map(|w| w.name.as_str()).collect()
}

#[test]
fn waypoint_without_name_is_dropped_not_raised() {
    let mf = read_marks_from_file(fixture("marks_missing_name.gpx")).unwrap();
    assert!(mf.waypoints.is_empty());
    assert_eq!(mf.dropped, 1);
}

#[test]
fn incomplete_waypoints_are_counted() {
    let mf = read_marks_from_file(fixture("marks_mixed.gpx")).unwrap();
    let names: Vec<&str> = mf.waypoints.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Committee boat", "Pin end"]);
    assert_eq!(mf.dropped, 4);
}

#[test]
fn malformed_mark_file_is_an_error_when_read_alone() {
    let err = read_marks_from_file(fixture("marks_malformed.gpx")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GraphError>(),
        Some(GraphError::MalformedXml { .. })
    ));
}

#[test]
fn only_root_level_waypoints_are_marks() {
    let gpx = r#"<gpx>
        <wpt lat="1" lon="1"><name>Mark</name></wpt>
        <rte><rtept lat="2" lon="2"><name>Route point</name></rtept></rte>
    </gpx>"#;
    let mf = read_marks_from_slice(gpx.as_bytes()).unwrap();
    assert_eq!(mf.waypoints.len(), 1);
    assert_eq!(mf.waypoints[0].name, "Mark");
}

#[test]
fn same_mark_in_two_files_is_loaded_once() {
    let config = GraphConfig::default();
    let track = load_track(fixture("three_points.gpx"), &config).unwrap();

    let marks = load_marks(
        &[fixture("marks_a.gpx"), fixture("marks_b.gpx")],
        &track,
        &config,
    );

    assert_eq!(names(&marks), vec!["Windward", "Leeward"]);
    assert_eq!(marks.failed_files(), 0);
}

#[test]
fn mark_on_the_bounds_edge_is_filtered_out() {
    let config = GraphConfig::default();
    let track = load_track(fixture("three_points.gpx"), &config).unwrap();

    let marks = load_marks(&[fixture("marks_a.gpx")], &track, &config);

    // maxlat is 0.5, so "On the northern edge" at lat 0.5 is excluded.
    assert_eq!(names(&marks), vec!["Windward"]);
}

#[test]
fn unfiltered_marks_keep_edge_and_distant_points() {
    let config = GraphConfig {
        filter_marks: false,
        ..Default::default()
    };
    let track = load_track(fixture("three_points.gpx"), &config).unwrap();

    let marks = load_marks(&[fixture("marks_a.gpx")], &track, &config);

    assert_eq!(
        names(&marks),
        vec!["Windward", "On the northern edge", "Far away"]
    );
}

#[test]
fn bad_mark_files_are_skipped_and_reported() {
    let config = GraphConfig::default();
    let track = load_track(fixture("three_points.gpx"), &config).unwrap();

    let marks = load_marks(
        &[
            fixture("missing_marks.gpx"),
            fixture("marks_malformed.gpx"),
            fixture("marks_missing_name.gpx"),
            fixture("marks_b.gpx"),
        ],
        &track,
        &config,
    );

    assert_eq!(names(&marks), vec!["Windward", "Leeward"]);
    assert_eq!(marks.reports.len(), 4);
    assert_eq!(marks.failed_files(), 2);
    assert_eq!(marks.total_dropped(), 1);
    assert!(matches!(marks.reports[0].outcome, MarkFileOutcome::Failed(_)));
    assert!(matches!(marks.reports[1].outcome, MarkFileOutcome::Failed(_)));
    assert_eq!(
        marks.reports[2].outcome,
        MarkFileOutcome::Loaded {
            accepted: 0,
            dropped: 1
        }
    );
    assert_eq!(
        marks.reports[3].outcome,
        MarkFileOutcome::Loaded {
            accepted: 2,
            dropped: 0
        }
    );
}

#[test]
fn marks_are_projected_from_the_track_origin() {
    let config = GraphConfig::default();
    let track = load_track(fixture("three_points.gpx"), &config).unwrap();

    let marks = load_marks(&[fixture("marks_b.gpx")], &track, &config);

    // The track starts at (0, 0), so Windward is north-east and Leeward is
    // south-west by the same amount.
    let windward = &marks.waypoints[0];
    let leeward = &marks.waypoints[1];
    assert!(windward.north_offset > 0.0 && windward.east_offset > 0.0);
    assert!((windward.north_offset + leeward.north_offset).abs() < 1e-12);
    assert!((windward.east_offset + leeward.east_offset).abs() < 1e-12);
}

#[test]
fn marks_on_the_equator_collapse_whatever_the_sign_of_zero() {
    let config = GraphConfig::default();
    let track = load_track(fixture("three_points.gpx"), &config).unwrap();

    let a = read_marks_from_slice(br#"<gpx><wpt lat="0.0" lon="0.2"><name>Pin</name></wpt></gpx>"#).unwrap();
    let b = read_marks_from_slice(br#"<gpx><wpt lat="-0.0" lon="0.2"><name>Pin</name></wpt></gpx>"#).unwrap();

    let placed = place_marks([a, b], &track, &config);

    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].name, "Pin");
}
