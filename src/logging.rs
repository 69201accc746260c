use std::io;

use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Sets up diagnostic logging on stderr.
///
/// `RUST_LOG` wins when set. Otherwise 0 = warnings only, 1 = debug output of
/// this crate, 2+ = trace for everything.
pub fn init_logging(verbose_level: u8) {
    let fallback = match verbose_level {
        0 => "warn",
        1 => "trakt_watch=debug,warn",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let fmt_layer = fmt::layer()
        .with_timer(ChronoUtc::rfc_3339())
        .with_target(verbose_level > 1)
        .with_writer(io::stderr);

    // a second init (tests, embedding) keeps the first subscriber
    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}
