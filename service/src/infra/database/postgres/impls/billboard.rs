//! [`Billboard`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Delete, Insert, Lock, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        billboard::{self, FinalPrice, Image},
        Billboard, Slug,
    },
    infra::{
        database::{
            self,
            postgres::{Connection, SubstringPattern},
            Postgres,
        },
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<billboard::Id, Billboard>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[billboard::Id]>,
{
    type Ok = HashMap<billboard::Id, Billboard>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<billboard::Id, Billboard>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[billboard::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap_or(i32::MAX);

        const SQL: &str = "\
            SELECT b.id, b.city_id, b.name, b.address, b.description, \
                   ARRAY(SELECT a.attribute_id \
                         FROM billboard_attributes AS a \
                         WHERE a.billboard_id = b.id \
                         ORDER BY a.attribute_id) AS attributes, \
                   b.has_power, b.length, b.width, \
                   b.price, b.price_currency, \
                   b.reservation_date, b.reseller_id, \
                   b.picture, b.map_iframe, \
                   b.title, b.url, b.seo_description, \
                   b.created_at \
            FROM billboards AS b \
            WHERE b.id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    Billboard {
                        id,
                        city_id: row.get("city_id"),
                        name: row.get("name"),
                        address: row.get("address"),
                        description: row.get("description"),
                        attributes: row.get("attributes"),
                        has_power: row.get("has_power"),
                        length: row.get("length"),
                        width: row.get("width"),
                        price: Money {
                            amount: row.get("price"),
                            currency: row.get("price_currency"),
                        },
                        reservation_date: row.get("reservation_date"),
                        reseller_id: row.get("reseller_id"),
                        picture: row.get("picture"),
                        map_iframe: row.get("map_iframe"),
                        title: row.get("title"),
                        url: row.get("url"),
                        seo_description: row.get("seo_description"),
                        created_at: row.get("created_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Billboard>, billboard::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<billboard::Id, Billboard>, [billboard::Id; 1]>>,
        Ok = HashMap<billboard::Id, Billboard>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Billboard>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Billboard>, billboard::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<'l, C> Database<Select<By<Option<Billboard>, &'l Slug>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Billboard>, billboard::Id>>,
        Ok = Option<Billboard>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Billboard>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Billboard>, &'l Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM billboards \
            WHERE url = $1::VARCHAR \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[url])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get("id"))))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Billboard>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Billboard>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(billboard): Insert<Billboard>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(billboard))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Billboard>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(billboard): Update<Billboard>,
    ) -> Result<Self::Ok, Self::Err> {
        let Billboard {
            id,
            city_id,
            name,
            address,
            description,
            attributes,
            has_power,
            length,
            width,
            price,
            reservation_date,
            reseller_id,
            picture,
            map_iframe,
            title,
            url,
            seo_description,
            created_at,
        } = billboard;

        const SQL: &str = "\
            INSERT INTO billboards (\
                id, city_id, name, address, description, \
                has_power, length, width, \
                price, price_currency, \
                reservation_date, reseller_id, \
                picture, map_iframe, \
                title, url, seo_description, \
                created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, $5::TEXT, \
                $6::BOOL, $7::NUMERIC, $8::NUMERIC, \
                $9::NUMERIC, $10::INT2, \
                $11::DATE, $12::UUID, \
                $13::VARCHAR, $14::TEXT, \
                $15::VARCHAR, $16::VARCHAR, $17::VARCHAR, \
                $18::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET city_id = EXCLUDED.city_id, \
                name = EXCLUDED.name, \
                address = EXCLUDED.address, \
                description = EXCLUDED.description, \
                has_power = EXCLUDED.has_power, \
                length = EXCLUDED.length, \
                width = EXCLUDED.width, \
                price = EXCLUDED.price, \
                price_currency = EXCLUDED.price_currency, \
                reservation_date = EXCLUDED.reservation_date, \
                reseller_id = EXCLUDED.reseller_id, \
                picture = EXCLUDED.picture, \
                map_iframe = EXCLUDED.map_iframe, \
                title = EXCLUDED.title, \
                url = EXCLUDED.url, \
                seo_description = EXCLUDED.seo_description";
        self.exec(
            SQL,
            &[
                &id,
                &city_id,
                &name,
                &address,
                &description,
                &has_power,
                &length,
                &width,
                &price.amount,
                &price.currency,
                &reservation_date,
                &reseller_id,
                &picture,
                &map_iframe,
                &title,
                &url,
                &seo_description,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())?;

        const CLEAR_ATTRIBUTES_SQL: &str = "\
            DELETE FROM billboard_attributes \
            WHERE billboard_id = $1::UUID \
              AND NOT (attribute_id = ANY($2::UUID[]))";
        self.exec(CLEAR_ATTRIBUTES_SQL, &[&id, &attributes])
            .await
            .map_err(tracerr::wrap!())?;

        const ATTRIBUTES_SQL: &str = "\
            INSERT INTO billboard_attributes (billboard_id, attribute_id) \
            SELECT $1::UUID, unnest($2::UUID[]) \
            ON CONFLICT DO NOTHING";
        self.exec(ATTRIBUTES_SQL, &[&id, &attributes])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Billboard, billboard::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Billboard, billboard::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: billboard::Id = by.into_inner();

        const SQL: &str = "\
            SELECT 1 \
            FROM billboards \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Billboard, Slug>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Billboard, Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let url: Slug = by.into_inner();

        // Released on transaction end, so no rows are left behind.
        const SQL: &str = "\
            SELECT pg_advisory_xact_lock(hashtext($1::VARCHAR))";
        self.query(SQL, &[&url])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<FinalPrice>, billboard::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<FinalPrice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<FinalPrice>, billboard::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: billboard::Id = by.into_inner();

        const SQL: &str = "\
            SELECT billboard_id, \
                   price, price_currency, \
                   surcharge, surcharge_currency \
            FROM billboard_final_prices \
            WHERE billboard_id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| FinalPrice {
                billboard_id: row.get("billboard_id"),
                price: Money {
                    amount: row.get("price"),
                    currency: row.get("price_currency"),
                },
                surcharge: Money {
                    amount: row.get("surcharge"),
                    currency: row.get("surcharge_currency"),
                },
            }))
    }
}

impl<C> Database<Insert<FinalPrice>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<FinalPrice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(price): Insert<FinalPrice>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(price)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<FinalPrice>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(price): Update<FinalPrice>,
    ) -> Result<Self::Ok, Self::Err> {
        let FinalPrice {
            billboard_id,
            price,
            surcharge,
        } = price;

        const SQL: &str = "\
            INSERT INTO billboard_final_prices (\
                billboard_id, \
                price, price_currency, \
                surcharge, surcharge_currency \
            ) VALUES (\
                $1::UUID, \
                $2::NUMERIC, $3::INT2, \
                $4::NUMERIC, $5::INT2 \
            ) \
            ON CONFLICT (billboard_id) DO UPDATE \
            SET price = EXCLUDED.price, \
                price_currency = EXCLUDED.price_currency, \
                surcharge = EXCLUDED.surcharge, \
                surcharge_currency = EXCLUDED.surcharge_currency";
        self.exec(
            SQL,
            &[
                &billboard_id,
                &price.amount,
                &price.currency,
                &surcharge.amount,
                &surcharge.currency,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Image>, billboard::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Image>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Image>, billboard::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: billboard::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, billboard_id, url, position \
            FROM billboard_images \
            WHERE billboard_id = $1::UUID \
            ORDER BY position";
        Ok(self
            .query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Image {
                id: row.get("id"),
                billboard_id: row.get("billboard_id"),
                url: row.get("url"),
                position: row.get("position"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Vec<Image>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(images): Insert<Vec<Image>>,
    ) -> Result<Self::Ok, Self::Err> {
        if images.is_empty() {
            return Ok(());
        }

        let (ids, billboard_ids, urls, positions): (
            Vec<_>,
            Vec<_>,
            Vec<_>,
            Vec<_>,
        ) = images
            .into_iter()
            .map(|i| (i.id, i.billboard_id, i.url, i.position))
            .multiunzip();

        const SQL: &str = "\
            INSERT INTO billboard_images (id, billboard_id, url, position) \
            SELECT * \
            FROM unnest($1::UUID[], $2::UUID[], $3::VARCHAR[], $4::INT2[])";
        self.exec(SQL, &[&ids, &billboard_ids, &urls, &positions])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Vec<Image>, billboard::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vec<Image>, billboard::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: billboard::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM billboard_images \
            WHERE billboard_id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Columns of a [`read::billboard::Summary`] selected out of the
/// `billboards` table joined with its location and final price.
const SUMMARY_COLUMNS: &str = "\
    b.id, b.name, b.address, b.url, b.picture, \
    b.reservation_date, b.created_at, \
    p.price AS final_price, p.price_currency AS final_price_currency, \
    c.id AS city_id, c.title AS city_title, c.url AS city_url, \
    s.id AS state_id, s.title AS state_title, s.url AS state_url";

/// Tables a [`read::billboard::Summary`] is selected from.
const SUMMARY_TABLES: &str = "\
    billboards AS b \
    INNER JOIN cities AS c ON c.id = b.city_id \
    INNER JOIN states AS s ON s.id = c.state_id \
    LEFT JOIN billboard_final_prices AS p ON p.billboard_id = b.id";

/// Builds a [`read::billboard::Summary`] out of the provided [`Row`].
fn summary(row: &Row) -> read::billboard::Summary {
    read::billboard::Summary {
        id: row.get("id"),
        name: row.get("name"),
        address: row.get("address"),
        url: row.get("url"),
        picture: row.get("picture"),
        final_price: row
            .get::<_, Option<_>>("final_price")
            .map(|amount| Money {
                amount,
                currency: row.get("final_price_currency"),
            }),
        reservation_date: row.get("reservation_date"),
        city: read::billboard::Place {
            id: row.get("city_id"),
            title: row.get("city_title"),
            url: row.get("city_url"),
        },
        state: read::billboard::Place {
            id: row.get("state_id"),
            title: row.get("state_title"),
            url: row.get("state_url"),
        },
        created_at: row.get("created_at"),
    }
}

impl<C>
    Database<
        Select<
            By<read::billboard::list::Page, read::billboard::list::Selector>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::billboard::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::billboard::list::Page, read::billboard::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        use read::billboard::list::{Filter, Page, Selector};

        let Selector { arguments, filter } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);

        let pattern = match &filter {
            Filter::Search(text) => {
                Some(SubstringPattern::new(text.as_ref()))
            }
            Filter::All | Filter::City(_) | Filter::State(_) => None,
        };
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let filtering = match (&filter, &pattern) {
            (Filter::City(slug), _) => {
                ps.push(slug);
                "AND c.url = $1::VARCHAR"
            }
            (Filter::State(slug), _) => {
                ps.push(slug);
                "AND s.url = $1::VARCHAR"
            }
            (Filter::Search(_), Some(pattern)) => {
                ps.push(pattern);
                "AND (b.name ILIKE $1::VARCHAR \
                      OR c.title ILIKE $1::VARCHAR \
                      OR s.title ILIKE $1::VARCHAR \
                      OR b.address ILIKE $1::VARCHAR)"
            }
            (Filter::All | Filter::Search(_), _) => "",
        };

        let count_sql = format!(
            "SELECT COUNT(*) AS total \
             FROM {SUMMARY_TABLES} \
             WHERE true {filtering}",
        );
        let total = self
            .query_opt(&count_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .map_or(0, |row| row.get::<_, i64>("total"));

        let limit_idx = ps.len() + 1;
        ps.push(&limit);
        ps.push(&offset);
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} \
             FROM {SUMMARY_TABLES} \
             WHERE true {filtering} \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT ${limit_idx}::INT8 OFFSET ${offset_idx}::INT8",
            offset_idx = limit_idx + 1,
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Page::new(
            arguments,
            rows.iter().map(summary),
            usize::try_from(total).unwrap_or_default(),
        ))
    }
}

impl<C>
    Database<
        Select<By<Vec<read::billboard::Summary>, read::billboard::Recent>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::billboard::Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::billboard::Summary>, read::billboard::Recent>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::billboard::Recent { limit } = by.into_inner();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} \
             FROM {SUMMARY_TABLES} \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT $1::INT8",
        );
        Ok(self
            .query(&sql, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(summary)
            .collect())
    }
}

impl<C>
    Database<
        Select<
            By<read::billboard::admin::Page, read::billboard::admin::Selector>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::billboard::admin::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::billboard::admin::Page, read::billboard::admin::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        use read::billboard::admin::{
            Filter, Page, Reservation, Row, Scope, Selector,
        };

        let Selector {
            arguments,
            filter:
                Filter {
                    scope,
                    reseller,
                    city,
                    attribute,
                    has_power,
                    reservation,
                    length,
                    width,
                    search,
                },
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);

        let scope = match scope {
            Scope::All => None,
            Scope::Reseller(id) => Some(id),
        };
        let pattern = search.as_ref().map(|s| SubstringPattern::new(s.as_ref()));

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let scope_idx = scope.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let reseller_idx = reseller.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let city_idx = city.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let attribute_idx = attribute.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let has_power_idx = has_power.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let reservation_sql = match &reservation {
            None => String::new(),
            Some(Reservation::Free) => {
                "AND b.reservation_date IS NULL".to_owned()
            }
            Some(Reservation::Reserved) => {
                "AND b.reservation_date IS NOT NULL".to_owned()
            }
            Some(Reservation::Until { from, to }) => {
                ps.push(from);
                ps.push(to);
                format!(
                    "AND b.reservation_date BETWEEN ${from}::DATE \
                                                AND ${to}::DATE",
                    from = ps.len() - 1,
                    to = ps.len(),
                )
            }
        };
        let length_idx = length.as_ref().map(|l| {
            ps.push(l);
            ps.len()
        });
        let width_idx = width.as_ref().map(|w| {
            ps.push(w);
            ps.len()
        });
        let pattern_idx = pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let filtering = format!(
            "{scope} {reseller} {city} {attribute} {has_power} {reservation} \
             {length} {width} {search}",
            scope = scope_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND b.reseller_id = ${idx}::UUID"))
            }),
            reseller = reseller_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND b.reseller_id = ${idx}::UUID"))
            }),
            city = city_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND b.city_id = ${idx}::UUID"))
            }),
            attribute = attribute_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND EXISTS (SELECT 1 \
                                 FROM billboard_attributes AS a \
                                 WHERE a.billboard_id = b.id \
                                   AND a.attribute_id = ${idx}::UUID)"
                ))
            }),
            has_power = has_power_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND b.has_power = ${idx}::BOOL"))
            }),
            reservation = reservation_sql,
            length = length_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND b.length = ${idx}::NUMERIC"))
            }),
            width = width_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND b.width = ${idx}::NUMERIC"))
            }),
            search = pattern_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND (b.name ILIKE ${idx}::VARCHAR \
                          OR b.address ILIKE ${idx}::VARCHAR \
                          OR u.name ILIKE ${idx}::VARCHAR \
                          OR c.title ILIKE ${idx}::VARCHAR)"
                ))
            }),
        );

        const TABLES: &str = "\
            billboards AS b \
            INNER JOIN users AS u ON u.id = b.reseller_id \
            INNER JOIN cities AS c ON c.id = b.city_id \
            LEFT JOIN billboard_final_prices AS p ON p.billboard_id = b.id";

        let count_sql = format!(
            "SELECT COUNT(*) AS total \
             FROM {TABLES} \
             WHERE true {filtering}",
        );
        let total = self
            .query_opt(&count_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .map_or(0, |row| row.get::<_, i64>("total"));

        let limit_idx = ps.len() + 1;
        ps.push(&limit);
        ps.push(&offset);
        let sql = format!(
            "SELECT b.id, b.name, b.address, \
                    b.reseller_id, u.name AS reseller_name, \
                    b.city_id, c.title AS city_title, \
                    ARRAY(SELECT a.attribute_id \
                          FROM billboard_attributes AS a \
                          WHERE a.billboard_id = b.id \
                          ORDER BY a.attribute_id) AS attributes, \
                    b.has_power, b.length, b.width, b.reservation_date, \
                    p.price AS final_price, \
                    p.price_currency AS final_price_currency \
             FROM {TABLES} \
             WHERE true {filtering} \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT ${limit_idx}::INT8 OFFSET ${offset_idx}::INT8",
            offset_idx = limit_idx + 1,
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Page::new(
            arguments,
            rows.into_iter().map(|row| Row {
                id: row.get("id"),
                name: row.get("name"),
                address: row.get("address"),
                reseller_id: row.get("reseller_id"),
                reseller_name: row.get("reseller_name"),
                city_id: row.get("city_id"),
                city_title: row.get("city_title"),
                attributes: row.get("attributes"),
                has_power: row.get("has_power"),
                length: row.get("length"),
                width: row.get("width"),
                reservation_date: row.get("reservation_date"),
                final_price: row.get::<_, Option<_>>("final_price").map(
                    |amount| Money {
                        amount,
                        currency: row.get("final_price_currency"),
                    },
                ),
            }),
            usize::try_from(total).unwrap_or_default(),
        ))
    }
}
