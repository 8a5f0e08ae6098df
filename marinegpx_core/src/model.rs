use std::path::PathBuf;

use crate::time_format::TimeFormat;

pub type Lat = f64; // -90..90
pub type Lon = f64; // -180..180

/// A pair of (lat, lon) coordinates which constitute a bounding box, as read
/// from the `<metadata><bounds>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// The minimum latitude.
    pub min_lat: Lat,
    /// The minimum longitude.
    pub min_lon: Lon,
    /// The maximum latitude.
    pub max_lat: Lat,
    /// The maximum longitude.
    pub max_lon: Lon,
}

/// A single recording session. Built once by the loader; the derived
/// fields of every point are filled in before the Track is handed out.
#[derive(Debug, Clone)]
pub struct Track {
    /// Where the track was read from, if it came from a file.
    pub filename: Option<PathBuf>,
    /// The `<trk><name>`, if there is one.
    pub name: Option<String>,
    /// The `<metadata><time>` of the recording. Kept as the raw text.
    pub recorded_at: Option<String>,
    /// The declared geographic envelope, if the file has one.
    pub bounds: Option<Bounds>,
    /// The number of `<trkseg>` elements in the file. Points from all
    /// segments are read in document order regardless.
    pub segment_count: usize,
    /// The format every `<time>` in the file was parsed with.
    pub time_format: TimeFormat,
    /// Never empty.
    pub points: Vec<TrackPoint>,
}

/// A `<trkpt>` with its planar and kinematic data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackPoint {
    /// The latitude, read from the "lat" attribute.
    pub lat: Lat,
    /// The longitude, read from the "lon" attribute.
    pub lon: Lon,
    /// Seconds since the first point. Negative if the file is out of order.
    pub elapsed_seconds: f64,

    // All the below fields are the derived ones.
    /// Nautical miles north of the first point.
    pub north_offset: f64,
    /// Nautical miles east of the first point.
    pub east_offset: f64,
    /// Knots, measured from the previous point. Always 0 for the first point.
    pub speed: f64,
    /// Rolling average of `speed`.
    pub smoothed_speed: f64,
}

/// A named mark loaded from a secondary file, placed in the frame of the
/// track it was loaded against.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub lat: Lat,
    pub lon: Lon,
    pub name: String,
    pub north_offset: f64,
    pub east_offset: f64,
}

/// Identity of a Waypoint. Two marks with the same lat, lon and name are
/// the same mark, whichever file they came from. The coordinates are
/// compared by value, so `0.0` and `-0.0` are the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaypointKey {
    lat_bits: u64,
    lon_bits: u64,
    name: String,
}

impl WaypointKey {
    pub fn new(lat: Lat, lon: Lon, name: &str) -> Self {
        Self {
            lat_bits: (lat + 0.0).to_bits(),
            lon_bits: (lon + 0.0).to_bits(),
            name: name.to_string(),
        }
    }
}

/// How to present elapsed time. Stored values are always seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeUnit {
    /// Hours for long tracks, minutes otherwise.
    #[default]
    Auto,
    Hours,
    Minutes,
}
