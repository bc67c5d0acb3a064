//! [`State`] and [`City`] read model definitions.

#[cfg(doc)]
use crate::domain::{City, State};
use crate::domain::Slug;

/// Filter of a [`City`] list.
#[derive(Clone, Debug, Default)]
pub struct CityFilter {
    /// URL [`Slug`] of the [`State`] to list the [`City`]s of.
    pub state: Option<Slug>,
}
