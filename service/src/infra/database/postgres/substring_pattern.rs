//! [`SubstringPattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL `LIKE` pattern matching values containing the given input.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct SubstringPattern(String);

impl SubstringPattern {
    /// Creates a new [`SubstringPattern`] out of the given `input`, escaping
    /// `LIKE` wildcards in it.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::SubstringPattern;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(SubstringPattern::new("Main").to_string(), "%Main%");
        assert_eq!(
            SubstringPattern::new(r"50%_off\").to_string(),
            r"%50\%\_off\\%",
        );
    }
}
