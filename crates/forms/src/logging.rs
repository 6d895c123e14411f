//! Console logging for binaries and examples built on this crate.
//!
//! The library itself only emits `tracing` events; nothing is printed until
//! a subscriber is installed.

use tracing_subscriber::{
    Layer, filter::LevelFilter, filter::filter_fn, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Install a console subscriber showing events up to `level`.
///
/// Safe to call more than once: later calls (and calls after another
/// subscriber was installed) leave the existing subscriber in place and
/// return `false`.
pub fn init(level: LevelFilter) -> bool {
    let console_layer = fmt::Layer::default()
        .with_target(false)
        .with_filter(filter_fn(move |metadata| metadata.level() <= &level));

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
}
