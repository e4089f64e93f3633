use std::env;

use log::{LevelFilter, Metadata, Record};

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging. The `ARMADA_LOG` environment variable picks the
/// level; otherwise `--verbose` maps to `debug` and the default is
/// `info`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let level = env::var("ARMADA_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(fallback);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
