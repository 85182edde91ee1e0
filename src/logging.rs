use tracing_subscriber::{EnvFilter, fmt};

/// Install the process wide log subscriber.
///
/// The engine logs through the `log` facade, the subscriber picks those
/// records up as well. An unparsable `filter` falls back to `warn`. Output
/// goes to stderr so it does not mix with table output.
pub fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed, e.g. when embedded in tests.
    let _ = subscriber.try_init();
}
