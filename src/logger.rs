//! Logging setup for the showdeps binary.
//!
//! Logs are written to stderr, or to `--log-file`. While the browser owns the
//! terminal, stderr output is held back with [`pause_stderr`]; pass a log
//! file to keep those records. The level is chosen as follows:
//!
//! 1. `--verbose`: debug for showdeps, warnings for everything else
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG` when set
//! 4. Default: warnings only
//!
//! ```rust,no_run
//! use showdeps::logger::init_logger;
//!
//! init_logger(false, false, None).unwrap();
//! tracing::warn!("shown by default");
//! ```

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::{EitherWriter, MakeWriter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither a flag nor `RUST_LOG` says otherwise.
pub const DEFAULT_FILTER: &str = "warn";

const VERBOSE_FILTER: &str = "warn,showdeps=debug";
const QUIET_FILTER: &str = "error";

/// Builds the level filter for the given flags. `verbose` wins over `quiet`.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

static STDERR_PAUSED: AtomicBool = AtomicBool::new(false);

/// Stderr writer that discards records while paused.
#[derive(Debug, Clone, Copy, Default)]
pub struct PausableStderr;

impl<'a> MakeWriter<'a> for PausableStderr {
    type Writer = EitherWriter<io::Stderr, io::Sink>;

    fn make_writer(&'a self) -> Self::Writer {
        if STDERR_PAUSED.load(Ordering::Relaxed) {
            EitherWriter::B(io::sink())
        } else {
            EitherWriter::A(io::stderr())
        }
    }
}

/// Keeps stderr logging paused until dropped.
#[derive(Debug)]
#[must_use = "stderr logging resumes as soon as the guard is dropped"]
pub struct StderrPause {
    _private: (),
}

/// Pauses stderr logging, e.g. while the alternate screen is active.
pub fn pause_stderr() -> StderrPause {
    STDERR_PAUSED.store(true, Ordering::Relaxed);
    StderrPause { _private: () }
}

impl Drop for StderrPause {
    fn drop(&mut self) {
        STDERR_PAUSED.store(false, Ordering::Relaxed);
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once, before anything logs. With `log_file` set, output is
/// appended to that file without colors and nothing goes to stderr.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init_logger(verbose: bool, quiet: bool, log_file: Option<&Path>) -> io::Result<()> {
    let filter = build_filter(verbose, quiet);

    let (stderr_layer, file_layer) = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            (None, Some(layer))
        }
        None => {
            let layer = fmt::layer()
                .with_writer(PausableStderr)
                .with_target(false)
                .compact();
            (Some(layer), None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)
}
