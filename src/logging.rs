//! `tracing` installation for embedders that do not bring their own subscriber.
//!
//! The core itself only emits `tracing` events. Hosts that already install a
//! subscriber can ignore this module entirely.

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, Once, OnceLock};

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::fmt::{self, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const TRACING_PREFIX: &str = "[embedded-content]";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::TRACE;

// ============================================================================
// Global State
// ============================================================================

static TRACING_INSTALLED: Once = Once::new();
static LOG_LEVEL: OnceLock<Arc<Mutex<LevelFilter>>> = OnceLock::new();

fn get_log_level_handle() -> Arc<Mutex<LevelFilter>> {
    LOG_LEVEL
        .get_or_init(|| Arc::new(Mutex::new(DEFAULT_LOG_LEVEL)))
        .clone()
}

/// Caps the level of events written by the installed subscriber.
///
/// Unparseable levels reset the cap so that only the `EnvFilter` applies.
pub fn set_level(level: &str) {
    let parsed = LevelFilter::from_str(level).unwrap_or(DEFAULT_LOG_LEVEL);
    if let Ok(mut guard) = get_log_level_handle().lock() {
        *guard = parsed;
    }
}

/// Returns the current runtime level cap.
#[must_use]
pub fn level() -> LevelFilter {
    get_log_level_handle()
        .lock()
        .map_or(DEFAULT_LOG_LEVEL, |guard| *guard)
}

// ============================================================================
// Installation
// ============================================================================

/// Installs a stderr `tracing` subscriber (idempotent).
///
/// `RUST_LOG` wins over `directive`; without either, `info` is used.
pub fn install(directive: Option<&str>) {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive.unwrap_or("info")));
        let level = get_log_level_handle();
        let runtime_cap = filter_fn(move |metadata| {
            let cap = level.lock().map_or(DEFAULT_LOG_LEVEL, |guard| *guard);
            level_allows(cap, *metadata.level())
        });

        let console = fmt::layer()
            .event_format(LifecycleFormatter)
            .with_writer(PrefixedWriter)
            .with_ansi(false)
            .with_filter(filter)
            .with_filter(runtime_cap);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("{TRACING_PREFIX} a global tracing subscriber is already installed");
        }
    });
}

fn level_allows(filter: LevelFilter, level: Level) -> bool {
    level <= filter
}

// ============================================================================
// Console Output
// ============================================================================

#[derive(Clone, Default)]
struct PrefixedWriter;

impl<'a> MakeWriter<'a> for PrefixedWriter {
    type Writer = PrefixedWriterInner<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixedWriterInner {
            inner: io::stderr(),
            wrote_prefix: false,
        }
    }
}

struct PrefixedWriterInner<W> {
    inner: W,
    wrote_prefix: bool,
}

impl<W: Write> Write for PrefixedWriterInner<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_prefix {
            self.inner.write_all(TRACING_PREFIX.as_bytes())?;
            self.inner.write_all(b" ")?;
            self.wrote_prefix = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[derive(Clone, Copy, Default)]
struct LifecycleFormatter;

impl<S, N> FormatEvent<S, N> for LifecycleFormatter
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        write!(writer, "{} {}: ", metadata.level(), metadata.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_allows() {
        assert!(!level_allows(LevelFilter::OFF, Level::ERROR));
        assert!(level_allows(LevelFilter::WARN, Level::ERROR));
        assert!(!level_allows(LevelFilter::WARN, Level::INFO));
        assert!(level_allows(LevelFilter::DEBUG, Level::DEBUG));
        assert!(!level_allows(LevelFilter::DEBUG, Level::TRACE));
        assert!(level_allows(LevelFilter::TRACE, Level::TRACE));
    }

    #[test]
    fn test_prefixed_writer_writes_prefix_once() {
        let mut writer = PrefixedWriterInner {
            inner: Vec::new(),
            wrote_prefix: false,
        };
        writer.write_all(b"first ").unwrap();
        writer.write_all(b"second").unwrap();
        assert_eq!(
            String::from_utf8(writer.inner).unwrap(),
            "[embedded-content] first second"
        );
    }

    #[test]
    fn test_install_is_idempotent() {
        install(Some("embedded_content=debug"));
        install(None);
        tracing::debug!(target: "embedded_content", "still alive");
    }
}
