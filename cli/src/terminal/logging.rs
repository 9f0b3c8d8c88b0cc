use std::fmt;
use std::io::{self, Write};

use colored::*;
use porthole_common::config::Config;
use porthole_common::log::SUCCESS_TARGET;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner;

/// Target of events that carry finished terminal output rather than a log line.
pub const PRINT_TARGET: &str = "porthole::print";

pub struct PortholeFormatter;

impl<S, N> FormatEvent<S, N> for PortholeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawMessage::default();
            event.record(&mut visitor);
            return writeln!(writer, "{}", visitor.0.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO if meta.target() == SUCCESS_TARGET => ("[✓]", |s| s.bright_green().bold()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Sends printed output to stdout and log lines to stderr, hiding the
/// spinner while either is written so the animation does not tear.
pub struct TerminalWriter {
    stream: Stream,
}

impl Write for TerminalWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        spinner::suspend(|| match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(buf),
            Stream::Stderr => io::stderr().lock().write_all(buf),
        })?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}

pub struct TerminalMakeWriter;

impl<'a> MakeWriter<'a> for TerminalMakeWriter {
    type Writer = TerminalWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TerminalWriter { stream: Stream::Stderr }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        let stream = if meta.target() == PRINT_TARGET { Stream::Stdout } else { Stream::Stderr };
        TerminalWriter { stream }
    }
}

/// Log level used when `RUST_LOG` is not set.
fn default_directives(cfg: &Config) -> String {
    let level: &str = match (cfg.json, cfg.quiet) {
        (true, _) => "error",
        (false, 0 | 1) => "info",
        (false, _) => "warn",
    };
    format!("{level},{PRINT_TARGET}=info")
}

pub fn init(cfg: &Config) {
    let filter: EnvFilter = match EnvFilter::try_from_default_env() {
        Ok(filter) => match format!("{PRINT_TARGET}=info").parse::<Directive>() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        },
        Err(_) => EnvFilter::new(default_directives(cfg)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(PortholeFormatter)
        .with_writer(TerminalMakeWriter)
        .try_init();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

/// Runs `f` under the subscriber `init` would install for `cfg` and returns
/// what would have reached stdout.
#[cfg(test)]
pub fn capture_stdout(cfg: &Config, f: impl FnOnce()) -> String {
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_directives(cfg)))
        .event_format(PortholeFormatter)
        .with_writer((move || writer.clone()).with_filter(|meta: &Metadata<'_>| meta.target() == PRINT_TARGET))
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes: Vec<u8> = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
