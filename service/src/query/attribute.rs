//! [`Query`] collection related to [`Attribute`]s.

use common::operations::By;

use crate::domain::{attribute, Attribute};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Attribute`]s.
pub type All = DatabaseQuery<By<Vec<Attribute>, ()>>;

/// Queries [`Attribute`]s by their IDs.
pub type ByIds = DatabaseQuery<By<Vec<Attribute>, Vec<attribute::Id>>>;
