use std::fmt;

use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime};

use crate::error::GraphError;

/// The timestamp encodings we know how to read from a `<time>` element.
/// A file's format is resolved once, from its first track point, and then
/// used for every other point in that file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `2018-07-29T12:00:00.123+02:00`
    FractionalWithOffset,
    /// `2018-07-29T12:00:00.123Z`
    FractionalUtc,
    /// `2018-07-29T12:00:00+02:00`
    WholeWithOffset,
    /// `2018-07-29T12:00:00Z`
    WholeUtc,
}

impl TimeFormat {
    /// All formats, in the order they are tried by `resolve`.
    pub const ALL: [TimeFormat; 4] = [
        TimeFormat::FractionalWithOffset,
        TimeFormat::FractionalUtc,
        TimeFormat::WholeWithOffset,
        TimeFormat::WholeUtc,
    ];

    /// Finds the first format that parses `sample`.
    pub fn resolve(sample: &str) -> Result<Self, GraphError> {
        Self::ALL
            .into_iter()
            .find(|fmt| fmt.parse(sample).is_ok())
            .ok_or_else(|| GraphError::UnrecognizedTimeFormat(sample.to_string()))
    }

    /// Parses `text` using this format. The `Z` formats are taken as UTC.
    /// Numeric offsets may be written `+HH:MM` or `+HHMM`.
    pub fn parse(self, text: &str) -> Result<OffsetDateTime, time::error::Parse> {
        match self {
            TimeFormat::FractionalWithOffset => OffsetDateTime::parse(
                text,
                format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"
                ),
            )
            .or_else(|_| {
                OffsetDateTime::parse(
                    text,
                    format_description!(
                        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
                    ),
                )
            }),
            TimeFormat::FractionalUtc => PrimitiveDateTime::parse(
                text,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]Z"),
            )
            .map(PrimitiveDateTime::assume_utc),
            TimeFormat::WholeWithOffset => OffsetDateTime::parse(
                text,
                format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
                ),
            )
            .or_else(|_| {
                OffsetDateTime::parse(
                    text,
                    format_description!(
                        "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
                    ),
                )
            }),
            TimeFormat::WholeUtc => PrimitiveDateTime::parse(
                text,
                format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z"),
            )
            .map(PrimitiveDateTime::assume_utc),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::FractionalWithOffset => write!(f, "%Y-%m-%dT%H:%M:%S.%f%z"),
            TimeFormat::FractionalUtc => write!(f, "%Y-%m-%dT%H:%M:%S.%fZ"),
            TimeFormat::WholeWithOffset => write!(f, "%Y-%m-%dT%H:%M:%S%z"),
            TimeFormat::WholeUtc => write!(f, "%Y-%m-%dT%H:%M:%SZ"),
        }
    }
}
