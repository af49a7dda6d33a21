//! Parser for the `Cache-Control` response header (RFC 9111 section 5.2).
//!
//! ```
//! use cache_control::ResponseCacheDirectives;
//!
//! let directives = ResponseCacheDirectives::parse(r#"private="Set-Cookie", max-age=60"#).unwrap();
//!
//! assert!(directives.private.contains("Set-Cookie"));
//! assert_eq!(directives.max_age.map(|age| age.as_secs()), Some(60));
//! ```

mod delta_seconds;
mod directive;
mod error;
mod response;

pub use delta_seconds::{DeltaSeconds, parse_delta_seconds};
pub use error::{DeltaSecondsError, Error, Result};
pub use response::{ResponseCacheDirectives, parse_response_cache_control};
