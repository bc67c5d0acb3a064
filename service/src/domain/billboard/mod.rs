//! [`Billboard`] definitions.

pub mod form;
pub mod image;
pub mod price;

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{location::City, Attribute, User};
use crate::domain::{attribute, location, user, Slug};

pub use self::{
    form::Layout,
    image::Image,
    price::{FinalPrice, Pricing},
};

/// Billboard advertising space offered for reservation.
#[derive(Clone, Debug)]
pub struct Billboard {
    /// ID of this [`Billboard`].
    pub id: Id,

    /// ID of the [`City`] this [`Billboard`] is located in.
    pub city_id: location::CityId,

    /// [`Name`] of this [`Billboard`].
    pub name: Name,

    /// [`Address`] of this [`Billboard`].
    pub address: Address,

    /// [`Description`] of this [`Billboard`].
    pub description: Description,

    /// IDs of [`Attribute`]s describing this [`Billboard`].
    pub attributes: Vec<attribute::Id>,

    /// Indicator whether this [`Billboard`] has power available.
    pub has_power: bool,

    /// Length of this [`Billboard`].
    pub length: Dimension,

    /// Width of this [`Billboard`].
    pub width: Dimension,

    /// Base price of this [`Billboard`] set by its reseller.
    pub price: Money,

    /// [`Date`] this [`Billboard`] is reserved until, if it is.
    pub reservation_date: Option<Date>,

    /// ID of the [`User`] reselling this [`Billboard`].
    pub reseller_id: user::Id,

    /// Main picture of this [`Billboard`].
    pub picture: Option<image::Url>,

    /// [`MapIframe`] showing the location of this [`Billboard`].
    pub map_iframe: Option<MapIframe>,

    /// SEO [`Title`] of this [`Billboard`].
    pub title: Title,

    /// URL [`Slug`] of this [`Billboard`].
    pub url: Slug,

    /// [`SeoDescription`] of this [`Billboard`].
    pub seo_description: SeoDescription,

    /// [`DateTime`] when this [`Billboard`] was created.
    pub created_at: CreationDateTime,
}

impl Billboard {
    /// Sets the [`Attribute`]s of this [`Billboard`], dropping duplicates.
    pub fn set_attributes(
        &mut self,
        attributes: impl IntoIterator<Item = attribute::Id>,
    ) {
        let mut attributes = attributes.into_iter().collect::<Vec<_>>();
        attributes.sort_unstable();
        attributes.dedup();
        self.attributes = attributes;
    }
}

/// ID of a [`Billboard`].
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
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Defines a text newtype of a [`Billboard`] limited in length.
macro_rules! define_text {
    (
        $(#[$meta:meta])*
        $name:ident { max_len: $max:literal, allow_empty: $empty:literal }
    ) => {
        $(#[$meta])*
        #[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(FromSql, ToSql),
            postgres(transparent),
        )]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`].")]
            ///
            /// # Safety
            ///
            /// The caller must ensure that the given `value` matches the
            /// format.
            #[expect(unsafe_code, reason = "bypass")]
            #[must_use]
            pub unsafe fn new_unchecked(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[doc = concat!(
                "Creates a new [`", stringify!($name), "`] if the given \
                 `value` is valid.",
            )]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            #[doc = concat!(
                "Checks whether the given `value` is a valid [`",
                stringify!($name),
                "`].",
            )]
            fn check(value: impl AsRef<str>) -> bool {
                let value = value.as_ref();
                value.trim() == value
                    && ($empty || !value.is_empty())
                    && value.chars().count() <= $max
            }
        }

        impl std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
                    .ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

define_text! {
    /// Name of a [`Billboard`].
    Name { max_len: 255, allow_empty: false }
}

define_text! {
    /// Street address of a [`Billboard`].
    Address { max_len: 512, allow_empty: false }
}

define_text! {
    /// Free-form description of a [`Billboard`].
    Description { max_len: 10_000, allow_empty: true }
}

define_text! {
    /// SEO title of a [`Billboard`].
    Title { max_len: 255, allow_empty: false }
}

define_text! {
    /// SEO description of a [`Billboard`].
    SeoDescription { max_len: 512, allow_empty: true }
}

/// Embeddable `<iframe>` of a map showing a [`Billboard`] location.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct MapIframe(String);

impl MapIframe {
    /// Creates a new [`MapIframe`] if the given `html` is a single
    /// `<iframe>` element.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Option<Self> {
        let html = html.into();
        Self::check(&html).then_some(Self(html))
    }

    /// Checks whether the given `html` is a valid [`MapIframe`].
    fn check(html: impl AsRef<str>) -> bool {
        let html = html.as_ref();
        let lower = html.to_lowercase();
        html.trim() == html
            && html.len() <= 4096
            && lower.starts_with("<iframe")
            && lower.ends_with("</iframe>")
            && lower.matches("<iframe").count() == 1
            && !lower.contains("<script")
    }
}

impl std::str::FromStr for MapIframe {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `MapIframe`")
    }
}

/// Positive length or width of a [`Billboard`] in meters.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Dimension(Decimal);

impl Dimension {
    /// Creates a new [`Dimension`] if the given `meters` are positive.
    #[must_use]
    pub fn new(meters: Decimal) -> Option<Self> {
        (meters > Decimal::ZERO).then(|| Self(meters.normalize()))
    }
}

impl std::str::FromStr for Dimension {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Dimension`")
    }
}

/// [`DateTime`] when a [`Billboard`] was created.
pub type CreationDateTime = DateTimeOf<(Billboard, unit::Creation)>;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Address, Description, Dimension, MapIframe, Name};

    #[test]
    fn validates_texts() {
        assert!(Name::new("Big Board 42").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
        assert!(Name::new("x".repeat(256)).is_none());
        assert!(Address::new("12 Main St.").is_some());
        assert!(Description::new("").is_some());
    }

    #[test]
    fn validates_dimension() {
        assert!(Dimension::new(Decimal::new(125, 1)).is_some());
        assert!(Dimension::new(Decimal::ZERO).is_none());
        assert!(Dimension::new(Decimal::NEGATIVE_ONE).is_none());
        assert!("3.5".parse::<Dimension>().is_ok());
        assert!("abc".parse::<Dimension>().is_err());
    }

    #[test]
    fn validates_map_iframe() {
        assert!(MapIframe::new(
            r#"<iframe src="https://maps.example.com/?q=1"></iframe>"#,
        )
        .is_some());
        assert!(MapIframe::new("<div></div>").is_none());
        assert!(MapIframe::new(
            "<iframe></iframe><script>alert(1)</script><iframe></iframe>",
        )
        .is_none());
    }
}
