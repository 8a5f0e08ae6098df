use geo::EuclideanDistance;

use crate::{error::GraphError, model::TrackPoint};

/// The default number of speeds averaged by `smooth_speed`.
pub const DEFAULT_WINDOW: usize = 20;

/// Calculates speed in knots from nautical miles and seconds. A zero time
/// delta gives a speed of 0; a negative one gives a negative speed.
pub fn speed_knots(nautical_miles: f64, seconds: f64) -> f64 {
    if seconds == 0.0 {
        return 0.0;
    }

    nautical_miles / (seconds / 3600.0)
}

/// Fills in `speed` for every point from the planar offsets and elapsed
/// times. The points must already have been projected. The first point
/// always gets a speed of 0.
pub fn derive_speed(points: &mut [TrackPoint]) {
    let Some(first) = points.first_mut() else {
        return;
    };
    first.speed = 0.0;

    // Note we are iterating all points EXCEPT the first one.
    for idx in 1..points.len() {
        let distance = points[idx - 1]
            .as_planar_point()
            .euclidean_distance(&points[idx].as_planar_point());
        let seconds = points[idx].elapsed_seconds - points[idx - 1].elapsed_seconds;
        points[idx].speed = speed_knots(distance, seconds);
    }
}

/// Fills in `smoothed_speed` with a trailing average of `window` speeds.
///
/// The first `window` points all get the mean of `speed[0..window]`. After
/// that, point `i` gets the mean of `speed[i - window..i]`, which does not
/// include point `i` itself. If there are fewer points than `window` they
/// all get the mean of every speed.
///
/// A window of 0 is rejected before anything is modified.
pub fn smooth_speed(points: &mut [TrackPoint], window: usize) -> Result<(), GraphError> {
    if window == 0 {
        return Err(GraphError::InvalidWindow(window));
    }

    if points.is_empty() {
        return Ok(());
    }

    let warm_up = window.min(points.len());
    let plateau = mean(points[..warm_up].iter().map(|p| p.speed), warm_up);
    let smoothed: Vec<f64> = (0..points.len())
        .map(|i| {
            if i < window {
                plateau
            } else {
                mean(points[i - window..i].iter().map(|p| p.speed), window)
            }
        })
        .collect();

    for (p, s) in points.iter_mut().zip(smoothed) {
        p.smoothed_speed = s;
    }

    Ok(())
}

fn mean<I: Iterator<Item = f64>>(values: I, count: usize) -> f64 {
    values.sum::<f64>() / count as f64
}
