use std::path::PathBuf;

use clap::{builder::TypedValueParser, value_parser, Parser};
use marinegpx_core::{config::GraphConfig, kinematics::DEFAULT_WINDOW, model::TimeUnit};

/*
 FILE                              the track to load
 --marks FILE [--marks FILE...]    overlay marks from other GPX files
 --no-filter                       keep marks outside the track's bounds
 --window N                        rolling average window for speed
 --hours | --minutes               force the elapsed time unit
*/

pub fn parse_args() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short = 'H',
        long,
        conflicts_with = "minutes",
        help = "Show elapsed time in hours instead of choosing automatically"
    )]
    pub hours: bool,

    #[arg(
        short = 'M',
        long,
        help = "Show elapsed time in minutes instead of choosing automatically"
    )]
    pub minutes: bool,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_WINDOW,
        value_parser = value_parser!(u16).range(1..).map(usize::from),
        help = "The number of points in the rolling average used to smooth the speed"
    )]
    pub window: usize,

    #[arg(
        short,
        long = "marks",
        help = "A GPX file of marks (waypoints) to place on the track. May be repeated."
    )]
    pub marks: Vec<PathBuf>,

    #[arg(
        long,
        help = "Keep marks that lie outside the track's bounding box"
    )]
    pub no_filter: bool,

    #[arg(help = "The GPX track file to load")]
    pub file: PathBuf,
}

impl Args {
    pub fn time_unit(&self) -> TimeUnit {
        if self.hours {
            TimeUnit::Hours
        } else if self.minutes {
            TimeUnit::Minutes
        } else {
            TimeUnit::Auto
        }
    }

    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            window: self.window,
            filter_marks: !self.no_filter,
            time_unit: self.time_unit(),
        }
    }
}
