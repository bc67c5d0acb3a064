//! [`State`]- and [`City`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{location, City, Slug, State},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds a [`State`] out of the provided [`Row`].
fn state(row: &Row) -> State {
    State {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        created_at: row.get("created_at"),
    }
}

/// Builds a [`City`] out of the provided [`Row`].
fn city(row: &Row) -> City {
    City {
        id: row.get("id"),
        state_id: row.get("state_id"),
        title: row.get("title"),
        url: row.get("url"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<State>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<State>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<State>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, title, url, created_at \
            FROM states \
            ORDER BY title";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(state)
            .collect())
    }
}

impl<C> Database<Select<By<Option<State>, location::StateId>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<State>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<State>, location::StateId>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, title, url, created_at \
            FROM states \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(state))
    }
}

impl<'l, C> Database<Select<By<Option<State>, &'l Slug>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<State>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<State>, &'l Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = by.into_inner();

        const SQL: &str = "\
            SELECT id, title, url, created_at \
            FROM states \
            WHERE url = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[url])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(state))
    }
}

impl<C> Database<Insert<State>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(state): Insert<State>,
    ) -> Result<Self::Ok, Self::Err> {
        let State {
            id,
            title,
            url,
            created_at,
        } = state;

        const SQL: &str = "\
            INSERT INTO states (id, title, url, created_at) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR, $4::TIMESTAMPTZ)";
        self.exec(SQL, &[&id, &title, &url, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<City>, read::location::CityFilter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<City>, read::location::CityFilter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::location::CityFilter { state } = by.into_inner();

        const SQL: &str = "\
            SELECT c.id, c.state_id, c.title, c.url, c.created_at \
            FROM cities AS c \
            INNER JOIN states AS s ON s.id = c.state_id \
            WHERE $1::VARCHAR IS NULL OR s.url = $1::VARCHAR \
            ORDER BY c.title";
        Ok(self
            .query(SQL, &[&state])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(city)
            .collect())
    }
}

impl<C> Database<Select<By<Option<City>, location::CityId>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, location::CityId>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, state_id, title, url, created_at \
            FROM cities \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(city))
    }
}

impl<'l, C> Database<Select<By<Option<City>, &'l Slug>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, &'l Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = by.into_inner();

        const SQL: &str = "\
            SELECT id, state_id, title, url, created_at \
            FROM cities \
            WHERE url = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[url])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(city))
    }
}

impl<C> Database<Insert<City>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(city): Insert<City>,
    ) -> Result<Self::Ok, Self::Err> {
        let City {
            id,
            state_id,
            title,
            url,
            created_at,
        } = city;

        const SQL: &str = "\
            INSERT INTO cities (id, state_id, title, url, created_at) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::TIMESTAMPTZ\
            )";
        self.exec(SQL, &[&id, &state_id, &title, &url, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
