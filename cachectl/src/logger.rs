//! Logger initialization for the command line tool

use std::{fmt::Write, io::IsTerminal, str::FromStr, sync::Once};

use jiff::{Timestamp, tz::TimeZone};
use logforth::{append::Stderr, filter::EnvFilter, layout::Layout};

static INIT: Once = Once::new();

/// One line per record: UTC timestamp, level, target and message.
#[derive(Debug)]
struct CliLayout {
    colored: bool,
}

impl Layout for CliLayout {
    fn format(
        &self,
        record: &log::Record<'_>,
        _diagnostics: &[Box<dyn logforth::diagnostic::Diagnostic>],
    ) -> anyhow::Result<Vec<u8>> {
        let mut output = String::new();
        let now = Timestamp::now().to_zoned(TimeZone::UTC);

        write!(output, "{} ", now.strftime("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        match level_color(record.level()) {
            Some(color) if self.colored => write!(output, "\x1b[{color}m{:>5}\x1b[0m", record.level())?,
            _ => write!(output, "{:>5}", record.level())?,
        }

        write!(output, " {}: {}", record.target(), record.args())?;

        Ok(output.into_bytes())
    }
}

/// ANSI colour code of the levels worth highlighting.
fn level_color(level: log::Level) -> Option<u8> {
    match level {
        log::Level::Error => Some(31),
        log::Level::Warn => Some(33),
        log::Level::Info | log::Level::Debug | log::Level::Trace => None,
    }
}

/// Initialize the stderr logger once.
/// The filter uses the `RUST_LOG` syntax, e.g. "warn" or "cache_control=trace,info"
pub fn init(log_filter: &str) {
    let log_filter = log_filter.to_owned();

    INIT.call_once(move || {
        let filter = EnvFilter::from_str(&log_filter).unwrap_or_else(|_| {
            eprintln!("Invalid log filter {log_filter:?}, falling back to \"info\"");
            EnvFilter::from_str("info").expect("default filter should be valid")
        });

        let layout = CliLayout {
            colored: std::io::stderr().is_terminal(),
        };

        logforth::builder()
            .dispatch(move |d| d.filter(filter).append(Stderr::default().with_layout(layout)))
            .apply();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_problems_are_colored() {
        assert_eq!(level_color(log::Level::Error), Some(31));
        assert_eq!(level_color(log::Level::Warn), Some(33));
        assert_eq!(level_color(log::Level::Info), None);
        assert_eq!(level_color(log::Level::Trace), None);
    }
}
