// Logging - tracing setup and the emoji/timestamp event format
// Everything goes to stderr so serialized reports on stdout stay clean.

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const VERBOSE_FILTER: &str = "cite_report=debug,warn";
const DEFAULT_FILTER: &str = "cite_report=warn";

pub struct CustomFormatter {
    /// Print the emitting module next to the level
    pub with_target: bool,
}

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = Local::now().format("%H:%M:%S");

        let (emoji, level_str) = level_label(metadata.level());
        write!(writer, "{} {} [{}]", emoji, level_str, timestamp)?;
        if self.with_target {
            write!(writer, " {}", metadata.target())?;
        }
        write!(writer, ": ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn level_label(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("🔬", "TRACE"),
        Level::DEBUG => ("🐛", "DEBUG"),
        Level::INFO => ("ℹ️ ", "INFO"),
        Level::WARN => ("⚠️ ", "WARN"),
        Level::ERROR => ("❌", "ERROR"),
    }
}

/// Default filter directive; `RUST_LOG` takes precedence when set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .event_format(CustomFormatter {
            with_target: verbose,
        })
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
