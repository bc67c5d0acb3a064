//! [`Query`] collection related to [`State`]s and [`City`]s.

use common::operations::By;

use crate::{
    domain::{location, City, State},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`State`]s.
pub type States = DatabaseQuery<By<Vec<State>, ()>>;

/// Queries a [`State`] by its ID.
pub type StateById = DatabaseQuery<By<Option<State>, location::StateId>>;

/// Queries [`City`]s, optionally of a single [`State`].
pub type Cities = DatabaseQuery<By<Vec<City>, read::location::CityFilter>>;

/// Queries a [`City`] by its ID.
pub type CityById = DatabaseQuery<By<Option<City>, location::CityId>>;
