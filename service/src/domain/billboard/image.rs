//! [`Image`] definitions.

use derive_more::{AsRef, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Billboard;
use crate::domain::billboard;

/// Maximum number of [`Image`]s in a gallery of a [`Billboard`].
pub const MAX_GALLERY_LEN: usize = 100;

/// Error of a [`Billboard`] gallery exceeding [`MAX_GALLERY_LEN`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("Gallery of {_0} images exceeds the limit of {MAX_GALLERY_LEN}")]
pub struct TooManyImages(#[error(not(source))] pub usize);

/// Image of a [`Billboard`] shown in its gallery.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// ID of this [`Image`].
    pub id: Id,

    /// ID of the [`Billboard`] this [`Image`] belongs to.
    pub billboard_id: billboard::Id,

    /// [`Url`] of this [`Image`].
    pub url: Url,

    /// Position of this [`Image`] in the gallery, starting from `0`.
    pub position: i16,
}

impl Image {
    /// Checks whether a gallery of the provided length fits into
    /// [`MAX_GALLERY_LEN`].
    ///
    /// # Errors
    ///
    /// If the `len` exceeds [`MAX_GALLERY_LEN`].
    pub const fn check_gallery_len(len: usize) -> Result<(), TooManyImages> {
        if len > MAX_GALLERY_LEN {
            Err(TooManyImages(len))
        } else {
            Ok(())
        }
    }

    /// Creates an ordered gallery of the [`Billboard`] out of the provided
    /// [`Url`]s.
    ///
    /// # Errors
    ///
    /// If there are more than [`MAX_GALLERY_LEN`] of the provided [`Url`]s.
    pub fn gallery(
        billboard_id: billboard::Id,
        urls: Vec<Url>,
    ) -> Result<Vec<Self>, TooManyImages> {
        Self::check_gallery_len(urls.len())?;
        Ok(urls
            .into_iter()
            .zip(0..)
            .map(|(url, position)| Self {
                id: Id(Uuid::new_v4()),
                billboard_id,
                url,
                position,
            })
            .collect())
    }
}

/// ID of an [`Image`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

/// URL of an image.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`] if the given `url` is valid.
    ///
    /// Both absolute `http(s)` URLs and absolute paths on this host are
    /// accepted.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Url`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        (url.starts_with("https://")
            || url.starts_with("http://")
            || url.starts_with('/'))
            && url.len() <= 2048
            && !url.chars().any(char::is_whitespace)
    }
}

impl std::str::FromStr for Url {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid image `Url`")
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::billboard;

    use super::{Image, TooManyImages, Url, MAX_GALLERY_LEN};

    #[test]
    fn validates_url() {
        assert!(Url::new("https://cdn.example.com/a.jpg").is_some());
        assert!(Url::new("/media/billboards/a.jpg").is_some());
        assert!(Url::new("ftp://example.com/a.jpg").is_none());
        assert!(Url::new("/media/with space.jpg").is_none());
    }

    #[test]
    fn gallery_keeps_order() {
        let id = billboard::Id::new();
        let gallery = Image::gallery(
            id,
            ["/a.jpg", "/b.jpg", "/c.jpg"]
                .map(|u| Url::new(u).unwrap())
                .into(),
        )
        .unwrap();

        assert_eq!(
            gallery.iter().map(|i| i.position).collect::<Vec<_>>(),
            [0, 1, 2],
        );
        assert_eq!(gallery[1].url.to_string(), "/b.jpg");
        assert!(gallery.iter().all(|i| i.billboard_id == id));
    }

    #[test]
    fn gallery_is_limited() {
        let urls = |n| vec![Url::new("/a.jpg").unwrap(); n];
        let id = billboard::Id::new();

        let full = Image::gallery(id, urls(MAX_GALLERY_LEN)).unwrap();
        assert_eq!(
            full.last().map(|i| i.position),
            Some(i16::try_from(MAX_GALLERY_LEN - 1).unwrap()),
        );

        assert_eq!(
            Image::gallery(id, urls(MAX_GALLERY_LEN + 1)).unwrap_err(),
            TooManyImages(MAX_GALLERY_LEN + 1),
        );
        assert_eq!(
            Image::gallery(id, urls(40_000)).unwrap_err(),
            TooManyImages(40_000),
        );
    }
}
