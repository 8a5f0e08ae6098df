use anyhow::{bail, Result};
use log::debug;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::model::{Lat, Lon, Waypoint};

use super::{attributes::Attributes, XmlReaderExtensions};

/// The waypoints read from one mark file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkFile {
    /// The complete waypoints, in document order. May contain duplicates.
    pub waypoints: Vec<Waypoint>,
    /// How many `<wpt>` elements were skipped because they lacked a lat,
    /// lon or name.
    pub dropped: usize,
}

pub(crate) fn parse_mark_document(xml_reader: &mut Reader<&[u8]>) -> Result<MarkFile> {
    let mut marks = None;

    loop {
        match xml_reader.next_event()? {
            Event::Start(_) if marks.is_some() => {
                bail!(xml_reader.malformed("found a second root element"));
            }
            Event::Start(_) => {
                marks = Some(parse_mark_root(xml_reader)?);
            }
            Event::Empty(_) if marks.is_none() => {
                marks = Some(MarkFile::default());
            }
            Event::Eof => break,
            _ => (),
        }
    }

    match marks {
        Some(marks) => Ok(marks),
        None => bail!(xml_reader.malformed("no root element found")),
    }
}

fn parse_mark_root(xml_reader: &mut Reader<&[u8]>) -> Result<MarkFile> {
    let mut marks = MarkFile::default();

    loop {
        match xml_reader.next_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"wpt" => {
                    let wpt = parse_waypoint(&e, xml_reader, false)?;
                    marks.add(wpt);
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"wpt" => {
                    let wpt = parse_waypoint(&e, xml_reader, true)?;
                    marks.add(wpt);
                }
                _ => (),
            },
            Event::End(_) => return Ok(marks),
            Event::Eof => bail!(xml_reader.malformed("reached end of file inside the root element")),
            _ => (),
        }
    }
}

/// Returns None if the waypoint is incomplete. Only a broken document is an
/// error.
fn parse_waypoint(
    tag: &BytesStart<'_>,
    xml_reader: &mut Reader<&[u8]>,
    is_empty: bool,
) -> Result<Option<Waypoint>> {
    let attributes = Attributes::new(tag, xml_reader)?;
    let lat = attributes.get::<Lat>("lat");
    let lon = attributes.get::<Lon>("lon");
    let mut name = None;

    if !is_empty {
        loop {
            match xml_reader.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => {
                        name = Some(xml_reader.read_inner_as_string(b"name")?);
                    }
                    _ => xml_reader.skip_element(&e)?,
                },
                Event::End(e) => match e.name().as_ref() {
                    b"wpt" => break,
                    _ => (),
                },
                Event::Eof => bail!(xml_reader.malformed("reached end of file inside <wpt>")),
                _ => (),
            }
        }
    }

    match (lat, lon, name) {
        (Ok(lat), Ok(lon), Some(name)) if !name.is_empty() => Ok(Some(Waypoint::new(lat, lon, name))),
        (Err(e), _, _) | (_, Err(e), _) => {
            debug!("Dropping waypoint: {e}");
            Ok(None)
        }
        _ => {
            debug!("Dropping waypoint: it has no name");
            Ok(None)
        }
    }
}

impl MarkFile {
    fn add(&mut self, wpt: Option<Waypoint>) {
        match wpt {
            Some(wpt) => self.waypoints.push(wpt),
            None => self.dropped += 1,
        }
    }
}
