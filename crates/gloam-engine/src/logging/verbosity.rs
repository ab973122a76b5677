use log::{LevelFilter, SetLoggerError};
use parking_lot::{Mutex, const_mutex};

/// Serializes writes to the `log` max level.
static LEVEL: Mutex<()> = const_mutex(());

/// Maps a numeric verbosity to a level filter.
///
/// 0 keeps warnings and errors, 1 adds info, 2 debug, 3 and above trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Current shared verbosity, derived from the `log` max level.
pub fn verbosity() -> u8 {
    match log::max_level() {
        LevelFilter::Off | LevelFilter::Error | LevelFilter::Warn => 0,
        LevelFilter::Info => 1,
        LevelFilter::Debug => 2,
        LevelFilter::Trace => 3,
    }
}

/// Raises the shared verbosity to at least `min`. Never lowers it.
pub fn raise_verbosity(min: u8) {
    let _guard = LEVEL.lock();
    let wanted = level_for(min);
    if log::max_level() < wanted {
        log::set_max_level(wanted);
    }
}

/// Installs `builder` as the global logger and starts it at `initial`
/// (or whatever `env_logger` derived from its own filter), keeping any raise
/// made before installation.
pub(super) fn install(
    mut builder: env_logger::Builder,
    initial: Option<LevelFilter>,
) -> Result<(), SetLoggerError> {
    let _guard = LEVEL.lock();
    let raised = log::max_level();

    builder.try_init()?;

    let level = initial.unwrap_or_else(log::max_level);
    log::set_max_level(level.max(raised));
    Ok(())
}
