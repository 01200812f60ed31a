use log::LevelFilter;

/// Set up env_logger. `RUST_LOG` wins unless `verbose` is set.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder.format_timestamp(None).init();
}
