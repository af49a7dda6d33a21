use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::Serialize;

use crate::{
    delta_seconds::{DeltaSeconds, parse_delta_seconds},
    directive::{Argument, Directive, Directives, KnownDirective},
    error::{Error, Result},
};

/// The directives of a `Cache-Control` response header.
///
/// Numeric directives that were not present are `None`. Field-name sets keep the case they were
/// written in and are ordered, so two equal headers always produce equal values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseCacheDirectives {
    pub max_age: Option<DeltaSeconds>,
    pub s_maxage: Option<DeltaSeconds>,
    /// Set by every `no-cache`, with or without field names.
    pub no_cache_present: bool,
    pub no_cache: BTreeSet<String>,
    /// Set by every `private`, with or without field names.
    pub private_present: bool,
    pub private: BTreeSet<String>,
    pub no_store: bool,
    pub no_transform: bool,
    pub must_revalidate: bool,
    pub proxy_revalidate: bool,
    pub public: bool,
    /// Unknown directives in header order, as `name` or `name=value`.
    pub extensions: Vec<String>,
}

/// Parses the value of a `Cache-Control` response header.
///
/// See [`ResponseCacheDirectives::parse`].
pub fn parse_response_cache_control(header: &str) -> Result<ResponseCacheDirectives> {
    ResponseCacheDirectives::parse(header)
}

impl ResponseCacheDirectives {
    /// Parses the value of a `Cache-Control` response header.
    ///
    /// An empty or blank header yields the default value. The first invalid directive rejects the
    /// whole header. When `max-age` or `s-maxage` is repeated, the last occurrence wins.
    pub fn parse(header: &str) -> Result<Self> {
        let mut directives = Self::default();

        for directive in Directives::new(header) {
            let result = directive.and_then(|directive| directives.apply(directive));

            if let Err(err) = result {
                log::debug!("Rejected Cache-Control header {header:?}: {err}");
                return Err(err);
            }
        }

        Ok(directives)
    }

    fn apply(&mut self, directive: Directive<'_>) -> Result<()> {
        let Directive { name, kind, argument } = directive;

        log::trace!("Cache-Control directive {name:?} with argument {argument:?}");

        let Some(kind) = kind else {
            self.extensions.push(match argument {
                Argument::None => name.to_owned(),
                argument => format!("{name}={argument}"),
            });

            return Ok(());
        };

        match kind {
            KnownDirective::MaxAge => {
                self.max_age = Some(delta_seconds(argument, Error::MaxAgeDeltaSeconds)?);
            }
            KnownDirective::SMaxAge => {
                self.s_maxage = Some(delta_seconds(argument, Error::SMaxAgeDeltaSeconds)?);
            }
            KnownDirective::NoCache => {
                self.no_cache_present = true;
                self.no_cache.extend(field_names(argument));
            }
            KnownDirective::Private => {
                self.private_present = true;
                self.private.extend(field_names(argument));
            }
            KnownDirective::NoStore => {
                no_argument(&argument, Error::NoStoreNoArgs)?;
                self.no_store = true;
            }
            KnownDirective::NoTransform => {
                no_argument(&argument, Error::NoTransformNoArgs)?;
                self.no_transform = true;
            }
            KnownDirective::MustRevalidate => {
                no_argument(&argument, Error::MustRevalidateNoArgs)?;
                self.must_revalidate = true;
            }
            KnownDirective::ProxyRevalidate => {
                no_argument(&argument, Error::ProxyRevalidateNoArgs)?;
                self.proxy_revalidate = true;
            }
            KnownDirective::Public => {
                no_argument(&argument, Error::PublicNoArgs)?;
                self.public = true;
            }
        }

        Ok(())
    }
}

fn delta_seconds(argument: Argument<'_>, error: Error) -> Result<DeltaSeconds> {
    let Argument::Value(value) = argument else {
        return Err(error);
    };

    parse_delta_seconds(&value).map_err(|err| {
        log::debug!("Invalid delta-seconds {value:?}: {err}");
        error
    })
}

fn no_argument(argument: &Argument<'_>, error: Error) -> Result<()> {
    if argument.is_none() { Ok(()) } else { Err(error) }
}

fn field_names(argument: Argument<'_>) -> Vec<String> {
    match argument {
        Argument::None => Vec::new(),
        Argument::Value(value) => vec![value.into_owned()],
        Argument::FieldNames(names) => names.into_iter().map(|name| name.into_owned()).collect(),
    }
}

impl FromStr for ResponseCacheDirectives {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&http::HeaderValue> for ResponseCacheDirectives {
    type Error = Error;

    fn try_from(value: &http::HeaderValue) -> Result<Self> {
        let value = value.to_str().map_err(|_| Error::InvalidHeaderValue)?;
        Self::parse(value)
    }
}

/// Writes the canonical header value. Parsing the output yields an equal value.
impl fmt::Display for ResponseCacheDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = DirectiveWriter { f, first: true };

        if self.public {
            out.name(KnownDirective::Public.as_ref())?;
        }

        if self.private_present {
            out.field_names(KnownDirective::Private.as_ref(), &self.private)?;
        }

        if self.no_cache_present {
            out.field_names(KnownDirective::NoCache.as_ref(), &self.no_cache)?;
        }

        let flags = [
            (self.no_store, KnownDirective::NoStore),
            (self.no_transform, KnownDirective::NoTransform),
            (self.must_revalidate, KnownDirective::MustRevalidate),
            (self.proxy_revalidate, KnownDirective::ProxyRevalidate),
        ];

        for (_, directive) in flags.iter().filter(|(set, _)| *set) {
            out.name(directive.as_ref())?;
        }

        if let Some(max_age) = self.max_age {
            out.name(KnownDirective::MaxAge.as_ref())?;
            write!(out.f, "={max_age}")?;
        }

        if let Some(s_maxage) = self.s_maxage {
            out.name(KnownDirective::SMaxAge.as_ref())?;
            write!(out.f, "={s_maxage}")?;
        }

        for extension in &self.extensions {
            match extension.split_once('=') {
                Some((name, value)) => {
                    out.name(name)?;
                    out.f.write_str("=")?;

                    if needs_quotes(value) {
                        write_quoted(out.f, value)?;
                    } else {
                        out.f.write_str(value)?;
                    }
                }
                None => out.name(extension)?,
            }
        }

        Ok(())
    }
}

struct DirectiveWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    first: bool,
}

impl DirectiveWriter<'_, '_> {
    fn name(&mut self, name: &str) -> fmt::Result {
        if !self.first {
            self.f.write_str(", ")?;
        }

        self.first = false;
        self.f.write_str(name)
    }

    fn field_names(&mut self, name: &str, field_names: &BTreeSet<String>) -> fmt::Result {
        self.name(name)?;

        if field_names.is_empty() {
            return Ok(());
        }

        self.f.write_str("=")?;
        let joined = field_names.iter().map(String::as_str).collect::<Vec<_>>().join(",");

        write_quoted(self.f, &joined)
    }
}

fn needs_quotes(value: &str) -> bool {
    value
        .bytes()
        .any(|b| matches!(b, b' ' | b'\t' | b',' | b'"' | b'\\'))
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;

    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }

        write!(f, "{c}")?;
    }

    f.write_str("\"")
}
