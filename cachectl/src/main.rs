use std::io::{BufRead, Write};

use anyhow::Context;
use args::Args;
use cache_control::ResponseCacheDirectives;
use clap::Parser;
use config::{Config, OutputFormat};

mod args;
mod logger;
mod output;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };

    let settings = Settings::resolve(&args, &config);
    logger::init(&settings.log_filter);

    log::debug!("Rendering parsed headers as {:?}", settings.format);

    let headers = if args.headers.is_empty() {
        read_headers(std::io::stdin().lock())?
    } else {
        args.headers
    };

    let mut stdout = std::io::stdout().lock();
    run(&headers, settings.format, &mut stdout)?;

    Ok(())
}

/// Values taken from the command line when given, otherwise from the configuration.
#[derive(Debug, PartialEq, Eq)]
struct Settings {
    log_filter: String,
    format: OutputFormat,
}

impl Settings {
    fn resolve(args: &Args, config: &Config) -> Self {
        Self {
            log_filter: args.log.clone().unwrap_or_else(|| config.log.filter.clone()),
            format: args.format.map_or(config.output.format, Into::into),
        }
    }
}

/// Parses every header value and writes the rendered result of each accepted one to `out`.
///
/// Rejected values are reported on stderr and make the whole run fail once all values are done.
fn run(headers: &[String], format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let mut rejected = 0;

    for header in headers {
        let value = strip_field_name(header);

        match ResponseCacheDirectives::parse(value) {
            Ok(directives) => writeln!(out, "{}", output::render(format, &directives)?)?,
            Err(err) => {
                rejected += 1;
                eprintln!("error: {value:?}: {err}");
            }
        }
    }

    out.flush()?;

    if rejected > 0 {
        anyhow::bail!("{rejected} of {} header values were rejected", headers.len());
    }

    Ok(())
}

/// Reads one header value per line, skipping blank lines.
fn read_headers(reader: impl BufRead) -> anyhow::Result<Vec<String>> {
    let mut headers = Vec::new();

    for line in reader.lines() {
        let line = line.context("Failed to read header values from stdin")?;

        if !line.trim().is_empty() {
            headers.push(line);
        }
    }

    log::debug!("Read {} header values from stdin", headers.len());

    Ok(headers)
}

/// Accepts whole header lines such as `Cache-Control: no-store` as well as bare values.
fn strip_field_name(header: &str) -> &str {
    const FIELD_NAME: &str = "cache-control:";

    match header.get(..FIELD_NAME.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(FIELD_NAME) => header[FIELD_NAME.len()..].trim_start(),
        _ => header,
    }
}
