//! [`State`]- and [`City`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A state grouping [`City`]s.
#[derive(Clone, Debug, From)]
pub struct State(domain::State);

/// A state grouping `City`s.
#[graphql_object(context = Context)]
impl State {
    /// Unique identifier of this `State`.
    #[must_use]
    pub fn id(&self) -> StateId {
        self.0.id.into()
    }

    /// Title of this `State`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// URL slug of this `State`.
    #[must_use]
    pub fn url(&self) -> scalar::Slug {
        self.0.url.clone().into()
    }

    /// `City`s of this `State`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "State.cities",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn cities(&self, ctx: &Context) -> Result<Vec<City>, Error> {
        ctx.service()
            .execute(query::location::Cities::by(
                service::read::location::CityFilter {
                    state: Some(self.0.url.clone()),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cities| cities.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `State` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// A city [`Billboard`]s are located in.
///
/// [`Billboard`]: api::Billboard
#[derive(Clone, Debug, From)]
pub struct City(domain::City);

/// A city `Billboard`s are located in.
#[graphql_object(context = Context)]
impl City {
    /// Unique identifier of this `City`.
    #[must_use]
    pub fn id(&self) -> CityId {
        self.0.id.into()
    }

    /// Title of this `City`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// URL slug of this `City`.
    #[must_use]
    pub fn url(&self) -> scalar::Slug {
        self.0.url.clone().into()
    }

    /// `State` this `City` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.state",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn state(&self, ctx: &Context) -> Result<State, Error> {
        ctx.service()
            .execute(query::location::StateById::by(self.0.state_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::query::LocationError::StateNotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// `DateTime` when this `City` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `State`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::location::StateId)]
#[into(domain::location::StateId)]
#[graphql(name = "StateId", transparent)]
pub struct StateId(Uuid);

/// Unique identifier of a `City`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::location::CityId)]
#[into(domain::location::CityId)]
#[graphql(name = "CityId", transparent)]
pub struct CityId(Uuid);

/// Title of a `State` or a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LocationTitle",
    with = scalar::Via::<domain::location::Title>,
)]
pub struct Title(domain::location::Title);
