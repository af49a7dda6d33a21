pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a `Cache-Control` response header is rejected.
///
/// Every rejection is fatal for the whole header, so a caller receiving one of these should treat
/// the response as not cacheable or fall back to its own conservative policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A quoted argument has no closing quote.
    #[error("Cache-Control: quoted string is not terminated")]
    QuoteMismatch,

    /// `max-age` is missing its value, or the value is negative or not a number.
    #[error("Cache-Control: max-age requires a non-negative delta-seconds value")]
    MaxAgeDeltaSeconds,

    /// `s-maxage` is missing its value, or the value is negative or not a number.
    #[error("Cache-Control: s-maxage requires a non-negative delta-seconds value")]
    SMaxAgeDeltaSeconds,

    #[error("Cache-Control: no-store does not take an argument")]
    NoStoreNoArgs,

    #[error("Cache-Control: no-transform does not take an argument")]
    NoTransformNoArgs,

    #[error("Cache-Control: must-revalidate does not take an argument")]
    MustRevalidateNoArgs,

    #[error("Cache-Control: proxy-revalidate does not take an argument")]
    ProxyRevalidateNoArgs,

    #[error("Cache-Control: public does not take an argument")]
    PublicNoArgs,

    /// The raw header value contains bytes outside of visible ASCII.
    #[error("Cache-Control: header value is not visible ASCII")]
    InvalidHeaderValue,
}

/// Reasons a delta-seconds token cannot be read as a number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeltaSecondsError {
    #[error("delta-seconds value is empty")]
    Empty,

    #[error("delta-seconds value cannot be negative")]
    Negative,

    #[error("delta-seconds value contains the non-digit character {0:?}")]
    InvalidDigit(char),
}
