//! [`Query`] collection related to a single [`Billboard`].

use common::operations::By;

use crate::domain::{
    billboard::{self, FinalPrice, Image},
    Billboard, Slug,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Billboard`] by its [`billboard::Id`].
pub type ById = DatabaseQuery<By<Option<Billboard>, billboard::Id>>;

/// Queries a [`Billboard`] by its URL [`Slug`].
pub type ByUrl<'u> = DatabaseQuery<By<Option<Billboard>, &'u Slug>>;

/// Queries a [`FinalPrice`] of a [`Billboard`].
pub type Price = DatabaseQuery<By<Option<FinalPrice>, billboard::Id>>;

/// Queries an ordered gallery of a [`Billboard`].
pub type Images = DatabaseQuery<By<Vec<Image>, billboard::Id>>;
