//! Logging setup shared by binaries built on this crate

/// Initialize logging with `RUST_LOG` directives plus a global level filter
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}
