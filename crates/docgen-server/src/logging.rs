use log::LevelFilter;

/// Initialise env_logger. `RUST_LOG` takes precedence when set; otherwise
/// `debug` selects the level.
pub fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();

    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    // Tests may initialise more than once.
    let _ = builder.format_timestamp_millis().try_init();
}
