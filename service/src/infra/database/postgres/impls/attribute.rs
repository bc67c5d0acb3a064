//! [`Attribute`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{attribute, Attribute},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Attribute>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attribute>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Attribute>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM attributes \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Attribute {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Attribute>, Vec<attribute::Id>>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Attribute>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attribute>, Vec<attribute::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        const SQL: &str = "\
            SELECT id, name \
            FROM attributes \
            WHERE id = ANY($1::UUID[]) \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Attribute {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<'l, C> Database<Select<By<Option<Attribute>, &'l attribute::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Attribute>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Attribute>, &'l attribute::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM attributes \
            WHERE LOWER(name) = LOWER($1::VARCHAR)";
        Ok(self
            .query_opt(SQL, &[name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Attribute {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Insert<Attribute>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(attribute): Insert<Attribute>,
    ) -> Result<Self::Ok, Self::Err> {
        let Attribute { id, name } = attribute;

        const SQL: &str = "\
            INSERT INTO attributes (id, name) \
            VALUES ($1::UUID, $2::VARCHAR)";
        self.exec(SQL, &[&id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
