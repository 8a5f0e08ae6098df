use std::fmt;

use geo::{point, EuclideanDistance, Point};

use crate::model::{Bounds, Lat, Lon, TimeUnit, Track, TrackPoint, Waypoint, WaypointKey};

/// Above this many seconds `TimeUnit::Auto` switches from minutes to hours.
pub const AUTO_HOURS_THRESHOLD_SECONDS: f64 = 9000.0;

impl Bounds {
    /// Returns the envelope of a set of (lat, lon) pairs, or None if there
    /// are no pairs.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Lat, Lon)>,
    {
        let mut iter = points.into_iter();
        let (lat, lon) = iter.next()?;
        let mut bounds = Bounds {
            min_lat: lat,
            min_lon: lon,
            max_lat: lat,
            max_lon: lon,
        };

        for (lat, lon) in iter {
            bounds.min_lat = bounds.min_lat.min(lat);
            bounds.max_lat = bounds.max_lat.max(lat);
            bounds.min_lon = bounds.min_lon.min(lon);
            bounds.max_lon = bounds.max_lon.max(lon);
        }

        Some(bounds)
    }

    /// True if the point lies inside the box and not on any of its edges.
    pub fn strictly_contains(&self, lat: Lat, lon: Lon) -> bool {
        lat > self.min_lat && lat < self.max_lat && lon > self.min_lon && lon < self.max_lon
    }
}

impl TrackPoint {
    pub fn new(lat: Lat, lon: Lon, elapsed_seconds: f64) -> Self {
        Self {
            lat,
            lon,
            elapsed_seconds,
            ..Default::default()
        }
    }

    /// Makes a geo-Point from the planar offsets of this point.
    /// n.b. x=east, y=north.
    pub fn as_planar_point(&self) -> Point {
        point! { x: self.east_offset, y: self.north_offset }
    }
}

impl Track {
    /// The name to show for the track: its own name, else the file name.
    pub fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        match &self.filename {
            Some(f) => f
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| f.to_string_lossy().into_owned()),
            None => "unnamed track".to_string(),
        }
    }

    /// Elapsed seconds of the last point.
    pub fn total_elapsed_seconds(&self) -> f64 {
        self.points.last().map(|p| p.elapsed_seconds).unwrap_or_default()
    }

    /// Sum of the planar distances between consecutive points, in nautical
    /// miles.
    pub fn total_distance(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].as_planar_point().euclidean_distance(&w[1].as_planar_point()))
            .sum()
    }

    pub fn max_speed(&self) -> f64 {
        self.points.iter().map(|p| p.speed).fold(0.0, f64::max)
    }

    pub fn max_smoothed_speed(&self) -> f64 {
        self.points.iter().map(|p| p.smoothed_speed).fold(0.0, f64::max)
    }

    /// The declared bounds, or the envelope of the points if the file did
    /// not declare any.
    pub fn effective_bounds(&self) -> Option<Bounds> {
        self.bounds
            .or_else(|| Bounds::from_points(self.points.iter().map(|p| (p.lat, p.lon))))
    }

    /// Elapsed time of every point, expressed in `unit`.
    pub fn elapsed_in(&self, unit: TimeUnit) -> Vec<f64> {
        let divisor = unit.resolve(self.total_elapsed_seconds()).seconds_per_unit();
        self.points.iter().map(|p| p.elapsed_seconds / divisor).collect()
    }
}

impl Waypoint {
    pub fn new<S: Into<String>>(lat: Lat, lon: Lon, name: S) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
            north_offset: 0.0,
            east_offset: 0.0,
        }
    }

    pub fn key(&self) -> WaypointKey {
        WaypointKey::new(self.lat, self.lon, &self.name)
    }
}

impl TimeUnit {
    /// Turns `Auto` into a concrete unit for a track lasting
    /// `total_seconds`. Hours and Minutes are returned unchanged.
    pub fn resolve(self, total_seconds: f64) -> TimeUnit {
        match self {
            TimeUnit::Auto if total_seconds > AUTO_HOURS_THRESHOLD_SECONDS => TimeUnit::Hours,
            TimeUnit::Auto => TimeUnit::Minutes,
            other => other,
        }
    }

    pub fn seconds_per_unit(self) -> f64 {
        match self {
            TimeUnit::Hours => 3600.0,
            TimeUnit::Minutes | TimeUnit::Auto => 60.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Auto => write!(f, "auto"),
            TimeUnit::Hours => write!(f, "hours"),
            TimeUnit::Minutes => write!(f, "minutes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_contains_excludes_every_edge() {
        let b = Bounds {
            min_lat: 10.0,
            min_lon: 20.0,
            max_lat: 11.0,
            max_lon: 21.0,
        };

        assert!(b.strictly_contains(10.5, 20.5));
        assert!(!b.strictly_contains(10.0, 20.5));
        assert!(!b.strictly_contains(11.0, 20.5));
        assert!(!b.strictly_contains(10.5, 20.0));
        assert!(!b.strictly_contains(10.5, 21.0));
        assert!(!b.strictly_contains(12.0, 20.5));
    }

    #[test]
    fn from_points_finds_envelope() {
        let b = Bounds::from_points([(1.0, 5.0), (-2.0, 7.0), (3.0, 6.0)]).unwrap();
        assert_eq!(
            b,
            Bounds {
                min_lat: -2.0,
                min_lon: 5.0,
                max_lat: 3.0,
                max_lon: 7.0,
            }
        );
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn auto_time_unit_switches_above_threshold() {
        assert_eq!(TimeUnit::Auto.resolve(9000.0), TimeUnit::Minutes);
        assert_eq!(TimeUnit::Auto.resolve(9000.5), TimeUnit::Hours);
        assert_eq!(TimeUnit::Minutes.resolve(100_000.0), TimeUnit::Minutes);
        assert_eq!(TimeUnit::Hours.resolve(10.0), TimeUnit::Hours);
    }

    #[test]
    fn waypoint_key_is_value_equality() {
        let a = Waypoint::new(1.5, 2.5, "Buoy");
        let b = Waypoint::new(1.5, 2.5, "Buoy");
        let c = Waypoint::new(1.5, 2.5, "Buoy 2");
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn signed_zero_coordinates_make_the_same_key() {
        let a = Waypoint::new(0.0, 0.5, "Pin");
        let b = Waypoint::new(-0.0, 0.5, "Pin");
        let c = Waypoint::new(0.5, -0.0, "Pin");
        let d = Waypoint::new(0.5, 0.0, "Pin");
        assert_eq!(a.key(), b.key());
        assert_eq!(c.key(), d.key());
    }
}
