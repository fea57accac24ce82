//! Logging setup for marker generation runs.
//!
//! [`init_with_level`] installs a `log` backend that writes one line per
//! record to stderr, stamped with the seconds since installation:
//!
//! ```text
//! [  0.012s  INFO] [3/16] DICT_4X4_50 id=2 -> output/marker_DICT_4X4_50_id=2.stl
//! [  0.013s DEBUG] aruco_solids_mesh::solid: union of 12 solids: 84 polygons
//! ```
//!
//! Debug and trace lines name their module so the CSG passes can be told
//! apart from the exporter. With the `tracing` feature, [`init_tracing`]
//! installs a `tracing-subscriber` pipeline instead.

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

/// Uptime-stamped stderr sink.
struct RunLog {
    max_level: LevelFilter,
    since: Instant,
}

/// One rendered log line, without the trailing newline.
struct Line<'a> {
    secs: f64,
    level: Level,
    target: &'a str,
    args: fmt::Arguments<'a>,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:7.3}s {:>5}] ", self.secs, self.level)?;
        if self.level >= Level::Debug {
            write!(f, "{}: ", self.target)?;
        }
        write!(f, "{}", self.args)
    }
}

impl Log for RunLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Line {
            secs: self.since.elapsed().as_secs_f64(),
            level: record.level(),
            target: record.target(),
            args: *record.args(),
        };
        // A closed stderr must not abort generation.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().lock().flush();
    }
}

static RUN_LOG: OnceLock<RunLog> = OnceLock::new();

/// Route `log` records at or above `level` to stderr.
///
/// The first call wins: later calls leave the installed level untouched and
/// succeed. Fails only when another `log` backend was installed first.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if RUN_LOG.get().is_some() {
        return Ok(());
    }
    let sink = RUN_LOG.get_or_init(|| RunLog {
        max_level: level,
        since: Instant::now(),
    });
    log::set_logger(sink)?;
    log::set_max_level(level);
    Ok(())
}

/// `EnvFilter` directive equivalent to a `log` level filter.
#[cfg(feature = "tracing")]
fn default_directive(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

/// Install a `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; without it events at `default_level` and
/// above are shown. `json` switches to flattened JSON lines. Span close
/// events are emitted so instrumented CSG and export stages report timing.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(default_level)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(tracing_subscriber::fmt::time::Uptime::default())
            .with_target(false)
            .finish()
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_noop() {
        init_with_level(LevelFilter::Warn).expect("first init");
        init_with_level(LevelFilter::Trace).expect("second init");
        assert_eq!(RUN_LOG.get().map(|l| l.max_level), Some(LevelFilter::Warn));
    }

    #[test]
    fn debug_lines_name_their_target() {
        fn render(level: Level, args: fmt::Arguments<'_>) -> String {
            Line {
                secs: 1.5,
                level,
                target: "aruco_solids_mesh::solid",
                args,
            }
            .to_string()
        }
        assert_eq!(
            render(Level::Info, format_args!("cut {} cells", 12)),
            "[  1.500s  INFO] cut 12 cells"
        );
        assert_eq!(
            render(Level::Debug, format_args!("cut {} cells", 12)),
            "[  1.500s DEBUG] aruco_solids_mesh::solid: cut 12 cells"
        );
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn cli_level_becomes_the_default_directive() {
        assert_eq!(default_directive(LevelFilter::Debug), "debug");
        assert_eq!(default_directive(LevelFilter::Off), "off");
    }
}
