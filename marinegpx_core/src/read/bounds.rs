use anyhow::Result;
use quick_xml::{events::BytesStart, Reader};

use crate::model::Bounds;

use super::attributes::Attributes;

/// Parses `<bounds minlat= minlon= maxlat= maxlon=>`. All four attributes
/// are required.
pub(crate) fn parse_bounds(tag: &BytesStart<'_>, xml_reader: &Reader<&[u8]>) -> Result<Bounds> {
    let attributes = Attributes::new(tag, xml_reader)?;

    Ok(Bounds {
        min_lat: attributes.get("minlat")?,
        min_lon: attributes.get("minlon")?,
        max_lat: attributes.get("maxlat")?,
        max_lon: attributes.get("maxlon")?,
    })
}
