// src/logging.rs
use log::LevelFilter;
use std::path::Path;

/// Sends log records to `log_file`. The terminal belongs to the UI, so without a file nothing
/// is logged at all.
pub fn init_logging(log_file: Option<&Path>, level: LevelFilter) -> Result<(), fern::InitError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;

    log::info!("Logging to {} at level {}", path.display(), level);
    Ok(())
}
