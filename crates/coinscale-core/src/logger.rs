//! Process-wide logging for the metrology crates.
//!
//! The classifiers and the frame orchestrator emit per-frame `log` records:
//! candidate counts and winning fits at `debug`, acquisition retries and
//! failed homography solves at `warn`. The CLI picks the level with
//! `--log-level` and installs one of two sinks:
//!
//! - [`init_with_level`]: stderr lines like
//!   `[  0.042s  WARN coinscale::app] frame 3: read failed, retrying`.
//! - [`init_tracing`] (feature `tracing`): a `tracing-subscriber` that also
//!   records the instrumented detector spans. `RUST_LOG` overrides the level.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:8.3}s {:>5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// Only the first call installs anything; later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// `EnvFilter` directive used when `RUST_LOG` is unset: `level` for every
/// target.
pub fn default_directive(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Install a `tracing` fmt subscriber closing detector and frame spans.
///
/// The filter comes from `RUST_LOG` when set and falls back to `level`
/// otherwise; `json` switches to flattened JSON events for log shipping.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
