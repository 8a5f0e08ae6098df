use anyhow::Result;
use log::{info, warn};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{error::GraphError, model::Bounds};

use super::{bounds::parse_bounds, XmlReaderExtensions};

/// The parts of `<metadata>` that we care about. Both are optional.
#[derive(Debug, Default)]
pub(crate) struct Metadata {
    pub(crate) time: Option<String>,
    pub(crate) bounds: Option<Bounds>,
}

pub(crate) fn parse_metadata(xml_reader: &mut Reader<&[u8]>) -> Result<Metadata> {
    let mut md = Metadata::default();

    loop {
        match xml_reader.next_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"time" => {
                    md.time = Some(xml_reader.read_inner_as_string(b"time")?);
                }
                b"bounds" => {
                    md.bounds = read_bounds(&e, xml_reader)?;
                    xml_reader.skip_element(&e)?;
                }
                _ => xml_reader.skip_element(&e)?,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"bounds" => {
                    md.bounds = read_bounds(&e, xml_reader)?;
                }
                _ => (),
            },
            Event::End(e) => match e.name().as_ref() {
                b"metadata" => {
                    log_metadata(&md);
                    return Ok(md);
                }
                _ => (),
            },
            Event::Eof => return Err(xml_reader.malformed("reached end of file inside <metadata>").into()),
            _ => (),
        }
    }
}

/// A bounds element with missing or unparseable attributes is ignored;
/// only a broken document is an error.
fn read_bounds(tag: &BytesStart<'_>, xml_reader: &Reader<&[u8]>) -> Result<Option<Bounds>> {
    match parse_bounds(tag, xml_reader) {
        Ok(bounds) => Ok(Some(bounds)),
        Err(e) if e.downcast_ref::<GraphError>().is_some() => Err(e),
        Err(e) => {
            warn!("Ignoring the metadata bounds: {e}");
            Ok(None)
        }
    }
}

fn log_metadata(md: &Metadata) {
    match &md.time {
        Some(t) => info!("Track recorded at {t}"),
        None => info!("Metadata has no time"),
    }

    match &md.bounds {
        Some(b) => {
            info!("\tMaximum/Minimum Latitude:\t{}\t/\t{}", b.max_lat, b.min_lat);
            info!("\tMaximum/Minimum Longitude:\t{}\t/\t{}", b.max_lon, b.min_lon);
        }
        None => info!("Metadata has no bounds"),
    }
}
