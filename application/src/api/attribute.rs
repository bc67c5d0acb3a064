//! [`Attribute`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// A feature a billboard may have, like lighting or a digital screen.
#[derive(Clone, Debug, From)]
pub struct Attribute(domain::Attribute);

/// A feature a `Billboard` may have, like lighting or a digital screen.
#[graphql_object(context = Context)]
impl Attribute {
    /// Unique identifier of this `Attribute`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Attribute`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }
}

/// Unique identifier of an `Attribute`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::attribute::Id)]
#[into(domain::attribute::Id)]
#[graphql(name = "AttributeId", transparent)]
pub struct Id(Uuid);

/// Name of an `Attribute`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AttributeName",
    with = scalar::Via::<domain::attribute::Name>,
)]
pub struct Name(domain::attribute::Name);
