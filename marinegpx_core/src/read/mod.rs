#![allow(clippy::single_match)]

use std::{fmt::Display, path::Path};

use anyhow::Result;
use log::info;
use logging_timer::time;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{error::GraphError, model::Track};

pub use marks::MarkFile;

mod attributes;
mod bounds;
mod marks;
mod metadata;
mod track;

/// Reads a track file. The returned Track has its raw fields filled in but
/// has not yet been projected or had speeds calculated, see
/// `pipeline::load_track` for that.
#[time]
pub fn read_track_from_file<P: AsRef<Path>>(input_file: P) -> Result<Track> {
    let input_file = input_file.as_ref();
    info!("Reading track file {:?}", input_file);
    let contents = read_file(input_file)?;
    let mut track = read_track_from_slice(&contents)?;
    track.filename = Some(input_file.to_owned());
    Ok(track)
}

pub fn read_track_from_slice(data: &[u8]) -> Result<Track> {
    let mut xml_reader = make_reader(data);
    track::parse_track_document(&mut xml_reader)
}

/// Reads the `<wpt>` elements from a mark file. Incomplete waypoints are
/// counted in `MarkFile::dropped` rather than causing an error.
#[time]
pub fn read_marks_from_file<P: AsRef<Path>>(input_file: P) -> Result<MarkFile> {
    let input_file = input_file.as_ref();
    info!("Reading mark file {:?}", input_file);
    let contents = read_file(input_file)?;
    read_marks_from_slice(&contents)
}

pub fn read_marks_from_slice(data: &[u8]) -> Result<MarkFile> {
    let mut xml_reader = make_reader(data);
    marks::parse_mark_document(&mut xml_reader)
}

fn read_file(input_file: &Path) -> Result<Vec<u8>, GraphError> {
    std::fs::read(input_file).map_err(|source| GraphError::Io {
        path: input_file.to_owned(),
        source,
    })
}

fn make_reader(data: &[u8]) -> Reader<&[u8]> {
    let mut xml_reader = Reader::from_reader(data);
    xml_reader.config_mut().trim_text(true);
    xml_reader
}

pub(crate) trait XmlReaderExtensions<'i> {
    /// Reads the next event, turning reader errors into `MalformedXml`.
    fn next_event(&mut self) -> Result<Event<'i>, GraphError>;

    /// Reads the text content of the element whose start tag was just
    /// consumed, up to and including its end tag. Nested elements are
    /// skipped.
    fn read_inner_as_string(&mut self, end: &[u8]) -> Result<String, GraphError>;

    /// Consumes everything up to and including the end tag matching
    /// `start`.
    fn skip_element(&mut self, start: &BytesStart<'_>) -> Result<(), GraphError>;

    fn malformed<M: Display>(&self, message: M) -> GraphError;
}

impl<'i> XmlReaderExtensions<'i> for Reader<&'i [u8]> {
    fn next_event(&mut self) -> Result<Event<'i>, GraphError> {
        self.read_event().map_err(|e| GraphError::MalformedXml {
            position: self.error_position() as u64,
            message: e.to_string(),
        })
    }

    fn read_inner_as_string(&mut self, end: &[u8]) -> Result<String, GraphError> {
        let mut text = String::new();

        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let t = t.unescape().map_err(|e| self.malformed(e))?;
                    text.push_str(&t);
                }
                Event::CData(t) => {
                    text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
                Event::Start(e) => self.skip_element(&e)?,
                Event::End(e) if e.name().as_ref() == end => {
                    return Ok(text.trim().to_string());
                }
                Event::Eof => {
                    return Err(self.malformed(format!(
                        "reached end of file inside <{}>",
                        String::from_utf8_lossy(end)
                    )))
                }
                _ => (),
            }
        }
    }

    fn skip_element(&mut self, start: &BytesStart<'_>) -> Result<(), GraphError> {
        self.read_to_end(start.name())
            .map(|_| ())
            .map_err(|e| GraphError::MalformedXml {
                position: self.error_position() as u64,
                message: e.to_string(),
            })
    }

    fn malformed<M: Display>(&self, message: M) -> GraphError {
        GraphError::MalformedXml {
            position: self.buffer_position() as u64,
            message: message.to_string(),
        }
    }
}

/// Returns the element name as a String, for log and error messages.
pub(crate) fn element_name(tag: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(tag.name().as_ref()).into_owned()
}
