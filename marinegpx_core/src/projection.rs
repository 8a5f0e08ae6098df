//! Equirectangular projection of lat-lon onto a flat plane centred on the
//! first point of a track. This is only accurate over small areas, which is
//! fine for a regatta course. Distances come out in nautical miles.

use crate::model::{Lat, Lon, TrackPoint};

/// Radius of the earth in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3436.801;

/// The reference point of a planar frame. Every track has its origin at its
/// first point, and marks loaded against the track reuse that origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    lon_rad: f64,
    north: f64,
    east: f64,
}

impl Origin {
    pub fn new(lat: Lat, lon: Lon) -> Self {
        let lon_rad = lon.to_radians();
        let (north, east) = raw_offsets(lat, lon, lon_rad);
        Self {
            lon_rad,
            north,
            east,
        }
    }

    /// Returns (north, east) nautical miles from the origin. The raw offsets
    /// are computed first and then re-centred, so the origin itself always
    /// comes out as exactly (0, 0).
    pub fn project(&self, lat: Lat, lon: Lon) -> (f64, f64) {
        let (north, east) = raw_offsets(lat, lon, self.lon_rad);
        (north - self.north, east - self.east)
    }
}

fn raw_offsets(lat: Lat, lon: Lon, origin_lon_rad: f64) -> (f64, f64) {
    let lat_rad = lat.to_radians();
    let north = lat_rad * EARTH_RADIUS_NM;
    let east = (lon.to_radians() - origin_lon_rad) * lat_rad.cos() * EARTH_RADIUS_NM;
    (north, east)
}

/// Fills in the north and east offsets of every point, relative to the
/// first one. Does nothing for an empty slice.
pub fn project_points(points: &mut [TrackPoint]) {
    let Some(first) = points.first() else {
        return;
    };

    let origin = Origin::new(first.lat, first.lon);
    for p in points.iter_mut() {
        (p.north_offset, p.east_offset) = origin.project(p.lat, p.lon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_is_exactly_the_origin() {
        let mut points = vec![
            TrackPoint::new(47.123456789, -122.987654321, 0.0),
            TrackPoint::new(47.2, -122.9, 60.0),
        ];
        project_points(&mut points);
        assert_eq!(points[0].north_offset, 0.0);
        assert_eq!(points[0].east_offset, 0.0);
    }

    #[test]
    fn one_minute_of_latitude_is_about_one_nautical_mile() {
        let mut points = vec![
            TrackPoint::new(50.0, -1.0, 0.0),
            TrackPoint::new(50.0 + 1.0 / 60.0, -1.0, 60.0),
        ];
        project_points(&mut points);
        assert!((points[1].north_offset - 1.0).abs() < 1e-3);
        assert!(points[1].east_offset.abs() < 1e-12);
    }

    #[test]
    fn east_offset_shrinks_with_latitude() {
        let at_equator = Origin::new(0.0, 0.0).project(0.0, 1.0).1;
        let at_sixty = Origin::new(60.0, 0.0).project(60.0, 1.0).1;
        assert!((at_sixty - at_equator * 0.5).abs() < 1e-9);
    }

    #[test]
    fn west_is_negative() {
        let (_, east) = Origin::new(10.0, 5.0).project(10.0, 4.5);
        assert!(east < 0.0);
    }

    #[test]
    fn empty_slice_is_fine() {
        let mut points: Vec<TrackPoint> = Vec::new();
        project_points(&mut points);
    }
}
