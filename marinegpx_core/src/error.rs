use std::path::PathBuf;

use thiserror::Error;

/// The errors that can stop a track or mark file from loading. Library
/// functions return `anyhow::Result`, with one of these as the root cause,
/// so callers can `downcast_ref::<GraphError>()` to find out what happened.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed XML at position {position}: {message}")]
    MalformedXml { position: u64, message: String },
    #[error("the file contains no track points")]
    NoTrackPoints,
    #[error("no supported time format matches {0:?}")]
    UnrecognizedTimeFormat(String),
    #[error("rolling average window must be at least 1, got {0}")]
    InvalidWindow(usize),
    #[error("track point {index} is invalid: {message}")]
    BadTrackPoint { index: usize, message: String },
}
