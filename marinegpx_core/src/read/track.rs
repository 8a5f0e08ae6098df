use anyhow::{bail, Result};
use log::{debug, info};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{
    error::GraphError,
    model::{Bounds, Lat, Lon, Track, TrackPoint},
    time_format::TimeFormat,
};

use super::{attributes::Attributes, metadata::parse_metadata, XmlReaderExtensions};

/*
<gpx>
   <metadata>                  parse_metadata
       <time>                  recorded_at
       <bounds/>               parse_bounds
   <trk>                       parse_track
       <name>                  name of the first named track
       <trkseg>                parse_track_segment
           <trkpt>             parse_trackpoint
               <time>
*/

/// A `<trkpt>` as it appears in the file, before its time is parsed.
#[derive(Debug)]
struct RawPoint {
    lat: Lat,
    lon: Lon,
    time: Option<String>,
}

#[derive(Debug, Default)]
struct RawTrack {
    name: Option<String>,
    recorded_at: Option<String>,
    bounds: Option<Bounds>,
    segment_count: usize,
    points: Vec<RawPoint>,
}

pub(crate) fn parse_track_document(xml_reader: &mut Reader<&[u8]>) -> Result<Track> {
    let mut raw = None;

    loop {
        match xml_reader.next_event()? {
            Event::Start(_) if raw.is_some() => {
                bail!(xml_reader.malformed("found a second root element"));
            }
            Event::Start(_) => {
                raw = Some(parse_gpx(xml_reader)?);
            }
            Event::Empty(_) if raw.is_none() => {
                raw = Some(RawTrack::default());
            }
            Event::Eof => break,
            _ => (),
        }
    }

    let Some(raw) = raw else {
        bail!(xml_reader.malformed("no root element found"));
    };

    raw.into_track()
}

/// Parses the children of the root element, consuming its end tag.
fn parse_gpx(xml_reader: &mut Reader<&[u8]>) -> Result<RawTrack> {
    let mut raw = RawTrack::default();
    let mut found_metadata = false;

    loop {
        match xml_reader.next_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"metadata" => {
                    let md = parse_metadata(xml_reader)?;
                    raw.recorded_at = md.time;
                    raw.bounds = md.bounds;
                    found_metadata = true;
                }
                b"trk" => {
                    parse_track(&mut raw, xml_reader)?;
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Event::End(_) => {
                if !found_metadata {
                    info!("Metadata not found, continuing");
                }
                return Ok(raw);
            }
            Event::Eof => bail!(xml_reader.malformed("reached end of file inside the root element")),
            _ => (),
        }
    }
}

fn parse_track(raw: &mut RawTrack, xml_reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match xml_reader.next_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"name" => {
                    let name = xml_reader.read_inner_as_string(b"name")?;
                    if raw.name.is_none() && !name.is_empty() {
                        raw.name = Some(name);
                    }
                }
                b"trkseg" => {
                    raw.segment_count += 1;
                    parse_track_segment(raw, xml_reader)?;
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"trkseg" => raw.segment_count += 1,
                _ => (),
            },
            Event::End(e) => match e.name().as_ref() {
                b"trk" => return Ok(()),
                _ => (),
            },
            Event::Eof => bail!(xml_reader.malformed("reached end of file inside <trk>")),
            _ => (),
        }
    }
}

fn parse_track_segment(raw: &mut RawTrack, xml_reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match xml_reader.next_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"trkpt" => {
                    let point = parse_trackpoint(&e, raw.points.len(), xml_reader, false)?;
                    raw.points.push(point);
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"trkpt" => {
                    let point = parse_trackpoint(&e, raw.points.len(), xml_reader, true)?;
                    raw.points.push(point);
                }
                _ => (),
            },
            Event::End(e) => match e.name().as_ref() {
                b"trkseg" => return Ok(()),
                _ => (),
            },
            Event::Eof => bail!(xml_reader.malformed("reached end of file inside <trkseg>")),
            _ => (),
        }
    }
}

fn parse_trackpoint(
    tag: &BytesStart<'_>,
    index: usize,
    xml_reader: &mut Reader<&[u8]>,
    is_empty: bool,
) -> Result<RawPoint> {
    let attributes = Attributes::new(tag, xml_reader)?;
    let bad_point = |e: anyhow::Error| GraphError::BadTrackPoint {
        index,
        message: e.to_string(),
    };
    let lat = attributes.get::<Lat>("lat").map_err(bad_point)?;
    let lon = attributes.get::<Lon>("lon").map_err(bad_point)?;

    let mut point = RawPoint {
        lat,
        lon,
        time: None,
    };

    if is_empty {
        return Ok(point);
    }

    loop {
        match xml_reader.next_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"time" => {
                    point.time = Some(xml_reader.read_inner_as_string(b"time")?);
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Event::End(e) => match e.name().as_ref() {
                b"trkpt" => return Ok(point),
                _ => (),
            },
            Event::Eof => bail!(xml_reader.malformed("reached end of file inside <trkpt>")),
            _ => (),
        }
    }
}

impl RawTrack {
    /// Resolves the time format from the first point and works out the
    /// elapsed seconds of every point relative to it.
    fn into_track(self) -> Result<Track> {
        match &self.name {
            Some(name) => info!("Track title: {name}"),
            None => info!("Track has no name"),
        }
        info!("Track has {} segments", self.segment_count);
        info!("Found {} points of tracking data", self.points.len());

        let Some(first) = self.points.first() else {
            bail!(GraphError::NoTrackPoints);
        };

        let first_time = first.time.as_deref().ok_or_else(|| GraphError::BadTrackPoint {
            index: 0,
            message: "no <time> element".to_string(),
        })?;
        let time_format = TimeFormat::resolve(first_time)?;
        info!("Time format string found {:?}", time_format.to_string());

        let start_time = time_format
            .parse(first_time)
            .map_err(|e| GraphError::BadTrackPoint {
                index: 0,
                message: e.to_string(),
            })?;

        let mut points = Vec::with_capacity(self.points.len());
        for (index, rp) in self.points.into_iter().enumerate() {
            let text = rp.time.ok_or_else(|| GraphError::BadTrackPoint {
                index,
                message: "no <time> element".to_string(),
            })?;
            let time = time_format
                .parse(&text)
                .map_err(|e| GraphError::BadTrackPoint {
                    index,
                    message: format!("time {text:?} does not match {time_format}: {e}"),
                })?;
            let elapsed = (time - start_time).as_seconds_f64();
            points.push(TrackPoint::new(rp.lat, rp.lon, elapsed));
        }

        debug!("Parsed the times of {} points", points.len());

        Ok(Track {
            filename: None,
            name: self.name,
            recorded_at: self.recorded_at,
            bounds: self.bounds,
            segment_count: self.segment_count,
            time_format,
            points,
        })
    }
}
