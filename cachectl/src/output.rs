//! Rendering of parsed directive sets in the configured output format.

use std::collections::BTreeMap;

use cache_control::{DeltaSeconds, ResponseCacheDirectives};
use config::OutputFormat;
use serde::Serialize;

pub fn render(format: OutputFormat, directives: &ResponseCacheDirectives) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(directives)?,
        OutputFormat::Legacy => serde_json::to_string_pretty(&LegacyDirectives::from(directives))?,
        OutputFormat::Header => directives.to_string(),
        OutputFormat::Debug => format!("{directives:#?}"),
    };

    Ok(rendered)
}

/// Boundary representation for consumers expecting `-1` for absent numbers and field names
/// mapped to `true`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LegacyDirectives<'a> {
    max_age: i64,
    #[serde(rename = "SMaxAge")]
    s_maxage: i64,
    no_cache_present: bool,
    no_cache: BTreeMap<&'a str, bool>,
    private_present: bool,
    private: BTreeMap<&'a str, bool>,
    no_store: bool,
    no_transform: bool,
    must_revalidate: bool,
    proxy_revalidate: bool,
    public: bool,
    extensions: &'a [String],
}

impl<'a> From<&'a ResponseCacheDirectives> for LegacyDirectives<'a> {
    fn from(directives: &'a ResponseCacheDirectives) -> Self {
        fn seconds(value: Option<DeltaSeconds>) -> i64 {
            value.map_or(-1, |seconds| i64::from(seconds.as_secs()))
        }

        fn field_names<'a>(names: impl IntoIterator<Item = &'a String>) -> BTreeMap<&'a str, bool> {
            names.into_iter().map(|name| (name.as_str(), true)).collect()
        }

        Self {
            max_age: seconds(directives.max_age),
            s_maxage: seconds(directives.s_maxage),
            no_cache_present: directives.no_cache_present,
            no_cache: field_names(&directives.no_cache),
            private_present: directives.private_present,
            private: field_names(&directives.private),
            no_store: directives.no_store,
            no_transform: directives.no_transform,
            must_revalidate: directives.must_revalidate,
            proxy_revalidate: directives.proxy_revalidate,
            public: directives.public,
            extensions: &directives.extensions,
        }
    }
}
