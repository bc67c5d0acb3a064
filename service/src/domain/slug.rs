//! [`Slug`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

/// URL-friendly identifier of a page, like `tehran-azadi-square`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a [`Slug`] in characters.
    const MAX_LEN: usize = 255;

    /// Creates a new [`Slug`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `slug` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Derives a [`Slug`] out of an arbitrary human-readable `title`.
    ///
    /// Letters are lowercased, any run of other characters becomes a single
    /// `-`. [`None`] is returned if the `title` has no letters or digits.
    #[must_use]
    pub fn from_title(title: impl AsRef<str>) -> Option<Self> {
        let mut slug = String::with_capacity(title.as_ref().len());
        for c in title.as_ref().chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
            if slug.chars().count() >= Self::MAX_LEN {
                break;
            }
        }
        let slug = slug.trim_end_matches('-').to_owned();
        Self::new(slug)
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Slug`] format:
        /// - letters, digits and `_` separated by single `-`;
        /// - no leading or trailing `-`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[\p{Ll}\p{Lo}\p{N}_]+(-[\p{Ll}\p{Lo}\p{N}_]+)*$")
                .expect("valid regex")
        });

        let slug = slug.as_ref();
        slug.chars().count() <= Self::MAX_LEN && REGEX.is_match(slug)
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

#[cfg(test)]
mod spec {
    use super::Slug;

    #[test]
    fn validates_format() {
        assert!(Slug::new("tehran-azadi-square").is_some());
        assert!(Slug::new("board_42").is_some());
        assert!(Slug::new("تهران-آزادی").is_some());

        assert!(Slug::new("").is_none());
        assert!(Slug::new("-leading").is_none());
        assert!(Slug::new("trailing-").is_none());
        assert!(Slug::new("double--dash").is_none());
        assert!(Slug::new("Upper").is_none());
        assert!(Slug::new("with space").is_none());
    }

    #[test]
    fn derives_from_title() {
        assert_eq!(
            Slug::from_title("Big Board 42!").unwrap().to_string(),
            "big-board-42",
        );
        assert_eq!(
            Slug::from_title("  Azadi Sq. -- North  ").unwrap().to_string(),
            "azadi-sq-north",
        );
        assert_eq!(
            Slug::from_title("بیلبورد میدان آزادی").unwrap().to_string(),
            "بیلبورد-میدان-آزادی",
        );
        assert!(Slug::from_title("!!!").is_none());
    }
}
