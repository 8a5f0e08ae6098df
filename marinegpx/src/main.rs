use anyhow::Result;
use args::parse_args;
use clap::builder::styling::AnsiColor;
use env_logger::{Builder, Env};
use log::{debug, info, warn};
use logging_timer::time;
use marinegpx_core::{
    marks::{load_marks, MarkSet},
    pipeline::load_track,
};
use std::io::Write;
use summary::write_summary;

mod args;
mod summary;

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

#[time]
fn main() -> Result<()> {
    configure_logging();
    info!("Starting {PROGRAM_NAME}");

    let args = parse_args();
    debug!("{:?}", &args);
    let config = args.config();

    let track = load_track(&args.file, &config)?;

    let marks = if args.marks.is_empty() {
        MarkSet::default()
    } else {
        let marks = load_marks(args.marks.as_slice(), &track, &config);
        if marks.failed_files() > 0 {
            warn!("{} mark files could not be loaded", marks.failed_files());
        }
        marks
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, &track, &marks, config.time_unit)?;
    out.flush()?;

    Ok(())
}

fn configure_logging() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    builder.format(|buf, record| {
        let level_style = buf.default_level_style(record.level());
        let level_style = match record.level() {
            log::Level::Error => level_style.fg_color(Some(AnsiColor::Red.into())),
            log::Level::Warn => level_style.fg_color(Some(AnsiColor::Yellow.into())),
            log::Level::Info => level_style.fg_color(Some(AnsiColor::Green.into())),
            log::Level::Debug => level_style.fg_color(Some(AnsiColor::Blue.into())),
            log::Level::Trace => level_style.fg_color(Some(AnsiColor::Magenta.into())),
        };

        let line_number_style = buf
            .default_level_style(record.level())
            .fg_color(Some(AnsiColor::Cyan.into()));

        match (record.file(), record.line()) {
            (Some(file), Some(line)) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}/{line_number_style}{}{line_number_style:#}] {}",
                buf.timestamp(),
                record.level(),
                file,
                line,
                record.args()
            ),
            (Some(file), None) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}] {}",
                buf.timestamp(),
                record.level(),
                file,
                record.args()
            ),
            (None, _) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#}] {}",
                buf.timestamp(),
                record.level(),
                record.args()
            ),
        }
    });

    builder.init();
}
