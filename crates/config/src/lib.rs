mod error;
mod loader;

use std::path::Path;

use serde::Deserialize;

pub use error::Error;

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

/// Configuration of the `cachectl` command line tool.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Config, Error> {
        loader::load(path)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// A filter such as `info` or `cache_control=trace,warn`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// How parsed headers are printed.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// The directive set as JSON, absent numbers as `null`.
    #[default]
    Json,
    /// JSON with `MaxAge`-style field names and `-1` for absent numbers.
    Legacy,
    /// The canonical `Cache-Control` header value.
    Header,
    /// Rust debug formatting.
    Debug,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::Config;

    #[test]
    fn all_values() {
        let config = indoc! {r#"
            [log]
            filter = "cache_control=trace,info"

            [output]
            format = "legacy"
        "#};

        let config: Config = toml::from_str(config).unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            log: LogConfig {
                filter: "cache_control=trace,info",
            },
            output: OutputConfig {
                format: Legacy,
            },
        }
        "#);
    }

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            log: LogConfig {
                filter: "warn",
            },
            output: OutputConfig {
                format: Json,
            },
        }
        "#);
    }

    #[test]
    fn empty_sections() {
        let config: Config = toml::from_str("[log]\n[output]\n").unwrap();

        assert_eq!(config.log.filter, "warn");
        assert_eq!(config.output.format, crate::OutputFormat::Json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = toml::from_str::<Config>("[output]\ncolour = true\n").unwrap_err();

        assert!(error.to_string().contains("unknown field `colour`"));
    }
}
