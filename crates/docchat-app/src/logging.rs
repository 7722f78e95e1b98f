use env_logger::Env;

/// Route `log` output to stderr. `RUST_LOG` wins unless `--verbose` was given.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None);

    // A second init (tests, embedding) is harmless
    let _ = builder.try_init();
}
