use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging once for the whole process.
///
/// Defaults to `info`; `RUST_LOG` overrides it.
pub fn init_logging() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .init();
        log::debug!("deboard v{} logging initialised", env!("CARGO_PKG_VERSION"));
    });
}
