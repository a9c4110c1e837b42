use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable that switches logging to debug level
pub const DEBUG_ENV: &str = "HORDESTATS_DEBUG";

pub fn debug_enabled() -> bool {
    std::env::var_os(DEBUG_ENV).is_some()
}

/// Install the stderr subscriber, INFO by default and DEBUG when `HORDESTATS_DEBUG` is set
pub fn init() {
    let level = if debug_enabled() {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install log subscriber: {}", e);
    }
}
