//! Tracing support for algorithm diagnostics.
//!
//! With the `tracing` feature enabled, algorithms open spans and emit events
//! through the `tracing` crate, and [`init_tracing`] installs a layer that
//! accumulates the time spent inside each span.  Without the feature every
//! macro used by the crate compiles to nothing.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    thread_local! {
        static SPAN_TIMINGS: RefCell<BTreeMap<&'static str, (Duration, usize)>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    SPAN_TIMINGS.with(|totals| {
                        let mut totals = totals.borrow_mut();
                        let entry = totals.entry(name).or_insert((Duration::ZERO, 0));
                        entry.0 += elapsed;
                        entry.1 += 1;
                    });
                }
            }
        }
    }

    /// Installs the global subscriber: the span timing layer, plus a
    /// formatted event log on stderr at the given verbosity (`0` disables
    /// the log, `1` is `debug`, anything higher is `trace`).
    pub fn init_tracing(verbosity: u8) {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let level = match verbosity {
                0 => LevelFilter::OFF,
                1 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            };
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level);
            let _ = Registry::default()
                .with(TimingLayer)
                .with(fmt_layer)
                .try_init();
        });
    }

    /// Returns the accumulated `(span name, total time, count)` entries,
    /// slowest first.
    pub fn method_timings() -> Vec<(&'static str, Duration, usize)> {
        SPAN_TIMINGS.with(|totals| {
            let mut entries: Vec<_> = totals
                .borrow()
                .iter()
                .map(|(name, (duration, count))| (*name, *duration, *count))
                .collect();
            entries.sort_by(|a, b| b.1.cmp(&a.1));
            entries
        })
    }

    #[doc(hidden)]
    pub fn dump_method_timings() {
        eprintln!("Span timings (desc):");
        for (name, duration, count) in method_timings() {
            eprintln!("  {name}: {:?} ({}x)", duration, count);
        }
    }

    #[doc(hidden)]
    pub fn reset_method_timings() {
        SPAN_TIMINGS.with(|totals| totals.borrow_mut().clear());
    }

    pub(crate) use tracing::{debug, info_span, trace};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::time::Duration;

    pub fn init_tracing(_verbosity: u8) {
        // No-op when tracing is disabled
    }

    pub fn method_timings() -> Vec<(&'static str, Duration, usize)> {
        Vec::new()
    }

    #[doc(hidden)]
    pub fn dump_method_timings() {
        // No-op when tracing is disabled
    }

    #[doc(hidden)]
    pub fn reset_method_timings() {
        // No-op when tracing is disabled
    }

    macro_rules! info_span {
        ($($args:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    macro_rules! debug {
        ($($args:tt)*) => {{}};
    }

    macro_rules! trace {
        ($($args:tt)*) => {{}};
    }

    pub(crate) use {debug, info_span, trace};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
