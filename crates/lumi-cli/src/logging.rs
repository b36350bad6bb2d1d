use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "lumi.log";

/// Send logs to `lumi.log` in the data directory; the terminal belongs to the UI.
///
/// The filter comes from `LUMI_LOG` (e.g. `LUMI_LOG=lumi_core=debug`) and
/// defaults to `warn`. Logging is skipped when the file can't be opened.
pub fn init() {
    let Ok(dir) = lumi_core::storage::data_dir() else {
        return;
    };
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env("LUMI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
