//! Tracing subscriber setup for the ballot daemon and tests.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering as usual. Set `BALLOT_LOG_FORMAT=json`
/// for newline-delimited JSON output (log shippers); anything else gets
/// the human-readable format.
pub fn init_tracing() {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    let json = std::env::var("BALLOT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
