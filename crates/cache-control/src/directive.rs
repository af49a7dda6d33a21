//! Tokenizer for the `#cache-directive` list.
//!
//! Directives are separated by commas and/or whitespace. Each one is `name` or `name=value`,
//! the value being either a bare token or a quoted string with backslash escapes.

use std::{borrow::Cow, fmt, str::FromStr};

use crate::error::Error;

/// Response directives with dedicated handling. Anything else is an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[strum(ascii_case_insensitive)]
pub(crate) enum KnownDirective {
    #[strum(serialize = "max-age")]
    MaxAge,
    #[strum(serialize = "s-maxage")]
    SMaxAge,
    #[strum(serialize = "no-cache")]
    NoCache,
    #[strum(serialize = "private")]
    Private,
    #[strum(serialize = "no-store")]
    NoStore,
    #[strum(serialize = "no-transform")]
    NoTransform,
    #[strum(serialize = "must-revalidate")]
    MustRevalidate,
    #[strum(serialize = "proxy-revalidate")]
    ProxyRevalidate,
    #[strum(serialize = "public")]
    Public,
}

impl KnownDirective {
    /// Directives whose argument is a list of header field names.
    fn takes_field_names(self) -> bool {
        matches!(self, Self::NoCache | Self::Private)
    }
}

/// The argument of a single directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Argument<'a> {
    None,
    /// A bare or quoted value, quotes and escapes removed.
    Value(Cow<'a, str>),
    /// The field names of `no-cache` or `private`.
    FieldNames(Vec<Cow<'a, str>>),
}

impl Argument<'_> {
    pub(crate) fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::None => Ok(()),
            Argument::Value(value) => f.write_str(value),
            Argument::FieldNames(names) => {
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }

                    f.write_str(name)?;
                }

                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    /// The name as written in the header.
    pub name: &'a str,
    pub kind: Option<KnownDirective>,
    pub argument: Argument<'a>,
}

/// Iterator over the directives of a header value.
///
/// Yields `Err(Error::QuoteMismatch)` at most once and then stops, since nothing after an
/// unterminated quote can be tokenized reliably.
pub(crate) struct Directives<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Directives<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn scan_until(&self, start: usize, stop: impl Fn(u8) -> bool) -> usize {
        self.input.as_bytes()[start..]
            .iter()
            .position(|&b| stop(b))
            .map_or(self.input.len(), |offset| start + offset)
    }

    /// Finds the end of a bare field-name list starting at `start`.
    ///
    /// The list runs over commas up to the next whitespace, but ends before a comma-separated
    /// element containing `=`, which is the next directive (`no-cache=Set-Cookie,max-age=0`).
    fn scan_field_names(&self, start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut end = self.scan_until(start, is_delimiter);

        while bytes.get(end) == Some(&b',') {
            let next_end = self.scan_until(end + 1, |b| is_delimiter(b) || b == b'=');

            if bytes.get(next_end) == Some(&b'=') {
                break;
            }

            end = next_end;
        }

        end
    }
}

impl<'a> Iterator for Directives<'a> {
    type Item = Result<Directive<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();

        self.position = self.scan_until(self.position, |b| !is_delimiter(b));

        if self.position >= bytes.len() {
            return None;
        }

        let name_end = self.scan_until(self.position, |b| is_delimiter(b) || b == b'=');
        let name = &self.input[self.position..name_end];
        let kind = KnownDirective::from_str(name).ok();
        let takes_field_names = kind.is_some_and(KnownDirective::takes_field_names);

        if bytes.get(name_end) != Some(&b'=') {
            self.position = name_end;

            return Some(Ok(Directive {
                name,
                kind,
                argument: Argument::None,
            }));
        }

        let value_start = name_end + 1;

        let value = if bytes.get(value_start) == Some(&b'"') {
            let Some((value, consumed)) = unquote(&self.input[value_start..]) else {
                self.position = bytes.len();
                return Some(Err(Error::QuoteMismatch));
            };

            self.position = value_start + consumed;
            value
        } else {
            let value_end = if takes_field_names {
                self.scan_field_names(value_start)
            } else {
                self.scan_until(value_start, is_delimiter)
            };
            let value = &self.input[value_start..value_end];

            self.position = value_end;
            Cow::Borrowed(value.strip_suffix(',').unwrap_or(value))
        };

        let argument = if takes_field_names {
            Argument::FieldNames(split_field_names(value))
        } else {
            Argument::Value(value)
        };

        Some(Ok(Directive { name, kind, argument }))
    }
}

fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_delimiter(b: u8) -> bool {
    is_whitespace(b) || b == b','
}

/// Reads a quoted string at the start of `input`, which must begin with `"`.
///
/// Returns the unescaped content and the number of bytes consumed including both quotes, or
/// `None` when the closing quote is missing.
fn unquote(input: &str) -> Option<(Cow<'_, str>, usize)> {
    let mut unescaped: Option<String> = None;
    let mut segment_start = 1;
    let mut chars = input.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let value = match unescaped {
                    Some(mut value) => {
                        value.push_str(&input[segment_start..i]);
                        Cow::Owned(value)
                    }
                    None => Cow::Borrowed(&input[1..i]),
                };

                return Some((value, i + 1));
            }
            '\\' => {
                let (j, escaped) = chars.next()?;
                let value = unescaped.get_or_insert_with(String::new);

                value.push_str(&input[segment_start..i]);
                value.push(escaped);

                segment_start = j + escaped.len_utf8();
            }
            _ => (),
        }
    }

    None
}

fn split_field_names(value: Cow<'_, str>) -> Vec<Cow<'_, str>> {
    fn names(value: &str) -> impl Iterator<Item = &str> {
        value.split(',').map(str::trim).filter(|name| !name.is_empty())
    }

    match value {
        Cow::Borrowed(value) => names(value).map(Cow::Borrowed).collect(),
        Cow::Owned(value) => names(&value).map(|name| Cow::Owned(name.to_owned())).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Result<Vec<(String, Argument<'_>)>, Error> {
        Directives::new(input)
            .map(|directive| directive.map(|d| (d.name.to_owned(), d.argument)))
            .collect()
    }

    fn value(value: &str) -> Argument<'_> {
        Argument::Value(Cow::Borrowed(value))
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(tokenize(""), Ok(vec![]));
        assert_eq!(tokenize(" \t , ,"), Ok(vec![]));
    }

    #[test]
    fn bare_names_and_values() {
        let directives = tokenize("public, max-age=60,s-maxage=5 \t foo").unwrap();

        assert_eq!(
            directives,
            vec![
                ("public".to_owned(), Argument::None),
                ("max-age".to_owned(), value("60")),
                ("s-maxage".to_owned(), value("5")),
                ("foo".to_owned(), Argument::None),
            ]
        );
    }

    #[test]
    fn known_names_are_case_insensitive() {
        let directive = Directives::new("Max-AGE=1").next().unwrap().unwrap();

        assert_eq!(directive.kind, Some(KnownDirective::MaxAge));
        assert_eq!(directive.name, "Max-AGE");
    }

    #[test]
    fn field_names_bare_value_spans_commas() {
        let directives = tokenize("private=Set-Cookie,Request-Id, public").unwrap();

        assert_eq!(
            directives,
            vec![
                (
                    "private".to_owned(),
                    Argument::FieldNames(vec![Cow::Borrowed("Set-Cookie"), Cow::Borrowed("Request-Id")])
                ),
                ("public".to_owned(), Argument::None),
            ]
        );
    }

    #[test]
    fn field_names_bare_value_ends_before_next_directive() {
        let directives = tokenize("no-cache=Set-Cookie,,max-age=0,public").unwrap();

        assert_eq!(
            directives,
            vec![
                (
                    "no-cache".to_owned(),
                    Argument::FieldNames(vec![Cow::Borrowed("Set-Cookie")])
                ),
                ("max-age".to_owned(), value("0")),
                ("public".to_owned(), Argument::None),
            ]
        );
    }

    #[test]
    fn field_names_quoted_are_trimmed() {
        let directives = tokenize(r#"no-cache=" a , b,,""#).unwrap();

        assert_eq!(
            directives,
            vec![(
                "no-cache".to_owned(),
                Argument::FieldNames(vec![Cow::Borrowed("a"), Cow::Borrowed("b")])
            )]
        );
    }

    #[test]
    fn other_bare_values_stop_at_comma() {
        let directives = tokenize("foo=a,b").unwrap();

        assert_eq!(
            directives,
            vec![("foo".to_owned(), value("a")), ("b".to_owned(), Argument::None)]
        );
    }

    #[test]
    fn empty_values() {
        let directives = tokenize(r#"foo="" bar= baz=,"#).unwrap();

        assert_eq!(
            directives,
            vec![
                ("foo".to_owned(), value("")),
                ("bar".to_owned(), value("")),
                ("baz".to_owned(), value("")),
            ]
        );
    }

    #[test]
    fn quoted_values_keep_delimiters() {
        let directives = tokenize(r#"foo="a, b c" bar"#).unwrap();

        assert_eq!(
            directives,
            vec![("foo".to_owned(), value("a, b c")), ("bar".to_owned(), Argument::None)]
        );
    }

    #[test]
    fn quoted_pairs_are_unescaped() {
        let directives = tokenize(r#"foo="say \"hi\" \\ bye""#).unwrap();

        assert_eq!(directives, vec![("foo".to_owned(), value(r#"say "hi" \ bye"#))]);
    }

    #[test]
    fn escaped_field_names() {
        let directives = tokenize(r#"private="x\"y,z""#).unwrap();

        assert_eq!(
            directives,
            vec![(
                "private".to_owned(),
                Argument::FieldNames(vec![Cow::Owned(r#"x"y"#.to_owned()), Cow::Owned("z".to_owned())])
            )]
        );
    }

    #[test]
    fn text_after_closing_quote_starts_a_new_directive() {
        let directives = tokenize(r#"foo="a"bar"#).unwrap();

        assert_eq!(
            directives,
            vec![("foo".to_owned(), value("a")), ("bar".to_owned(), Argument::None)]
        );
    }

    #[test]
    fn unterminated_quote() {
        assert_eq!(tokenize(r#"foo=""#), Err(Error::QuoteMismatch));
        assert_eq!(tokenize(r#"public, foo="abc, max-age=1"#), Err(Error::QuoteMismatch));
        assert_eq!(tokenize(r#"foo="abc\""#), Err(Error::QuoteMismatch));
        assert_eq!(tokenize(r#"foo="abc\"#), Err(Error::QuoteMismatch));
    }

    #[test]
    fn stops_after_quote_mismatch() {
        let mut directives = Directives::new(r#"foo="abc"#);

        assert_eq!(directives.next(), Some(Err(Error::QuoteMismatch)));
        assert_eq!(directives.next(), None);
    }

    #[test]
    fn non_ascii_values() {
        let directives = tokenize(r#"ext="héllo" ünï=ç"#).unwrap();

        assert_eq!(
            directives,
            vec![("ext".to_owned(), value("héllo")), ("ünï".to_owned(), value("ç"))]
        );
    }

    #[test]
    fn argument_display() {
        let list = Argument::FieldNames(vec![Cow::Borrowed("a"), Cow::Borrowed("b")]);

        assert_eq!(list.to_string(), "a,b");
        assert_eq!(value("x y").to_string(), "x y");
        assert_eq!(Argument::None.to_string(), "");
    }
}
