//! [`State`] and [`City`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Slug;
#[cfg(doc)]
use crate::domain::Billboard;

/// Geographic state (province) grouping [`City`]s.
#[derive(Clone, Debug)]
pub struct State {
    /// ID of this [`State`].
    pub id: StateId,

    /// [`Title`] of this [`State`].
    pub title: Title,

    /// URL [`Slug`] of this [`State`].
    pub url: Slug,

    /// [`DateTime`] when this [`State`] was created.
    pub created_at: DateTimeOf<(State, unit::Creation)>,
}

/// City containing [`Billboard`]s.
#[derive(Clone, Debug)]
pub struct City {
    /// ID of this [`City`].
    pub id: CityId,

    /// ID of the [`State`] this [`City`] belongs to.
    pub state_id: StateId,

    /// [`Title`] of this [`City`].
    pub title: Title,

    /// URL [`Slug`] of this [`City`].
    pub url: Slug,

    /// [`DateTime`] when this [`City`] was created.
    pub created_at: DateTimeOf<(City, unit::Creation)>,
}

/// ID of a [`State`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct StateId(Uuid);

impl StateId {
    /// Creates a new random [`StateId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// ID of a [`City`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct CityId(Uuid);

impl CityId {
    /// Creates a new random [`CityId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Human-readable title of a [`State`] or a [`City`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 128
    }
}

impl std::str::FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}
