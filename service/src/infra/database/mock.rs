//! In-memory [`Database`] used in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{
        attribute,
        billboard::{self, FinalPrice, Image},
        location, user, Attribute, Billboard, City, Slug, State, User,
    },
    infra::{database, Database},
    read,
};

/// Contents of a [`Mock`] database.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: Vec<User>,
    pub(crate) states: Vec<State>,
    pub(crate) cities: Vec<City>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) billboards: Vec<Billboard>,
    pub(crate) final_prices: Vec<FinalPrice>,
    pub(crate) images: Vec<Image>,
}

/// In-memory [`Database`] whose transactions are applied immediately.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mock(Arc<Mutex<Tables>>);

impl Tables {
    /// Returns the stored [`Billboard`]s, most recent first.
    fn recent_billboards(&self) -> Vec<&Billboard> {
        let mut billboards = self.billboards.iter().collect::<Vec<_>>();
        billboards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        billboards
    }

    /// Returns the final price of the [`Billboard`] with the provided ID.
    fn final_price(&self, id: billboard::Id) -> Option<common::Money> {
        self.final_prices
            .iter()
            .find(|p| p.billboard_id == id)
            .map(|p| p.price)
    }

    /// Joins the provided [`Billboard`] with its location into a
    /// [`read::billboard::Summary`].
    fn summary(&self, b: &Billboard) -> Option<read::billboard::Summary> {
        let city = self.cities.iter().find(|c| c.id == b.city_id)?;
        let state = self.states.iter().find(|s| s.id == city.state_id)?;
        Some(read::billboard::Summary {
            id: b.id,
            name: b.name.clone(),
            address: b.address.clone(),
            url: b.url.clone(),
            picture: b.picture.clone(),
            final_price: self.final_price(b.id),
            reservation_date: b.reservation_date,
            city: read::billboard::Place {
                id: city.id,
                title: city.title.clone(),
                url: city.url.clone(),
            },
            state: read::billboard::Place {
                id: state.id,
                title: state.title.clone(),
                url: state.url.clone(),
            },
            created_at: b.created_at,
        })
    }

    /// Joins the provided [`Billboard`] with its reseller and [`City`] into a
    /// [`read::billboard::admin::Row`].
    fn admin_row(&self, b: &Billboard) -> Option<read::billboard::admin::Row> {
        let reseller = self.users.iter().find(|u| u.id == b.reseller_id)?;
        let city = self.cities.iter().find(|c| c.id == b.city_id)?;
        Some(read::billboard::admin::Row {
            id: b.id,
            name: b.name.clone(),
            address: b.address.clone(),
            reseller_id: reseller.id,
            reseller_name: reseller.name.clone(),
            city_id: city.id,
            city_title: city.title.clone(),
            attributes: b.attributes.clone(),
            has_power: b.has_power,
            length: b.length,
            width: b.width,
            reservation_date: b.reservation_date,
            final_price: self.final_price(b.id),
        })
    }
}

impl Mock {
    /// Returns the [`Tables`] of this [`Mock`].
    pub(crate) fn tables(&self) -> MutexGuard<'_, Tables> {
        self.0.lock().unwrap()
    }
}

/// Shortcut for a [`Mock`] result.
type Result<T> = std::result::Result<T, Traced<database::Error>>;

impl Database<Transact> for Mock {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<()> {
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Mock {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok> {
        let id = by.into_inner();
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Login>>> for Mock {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Login>>,
    ) -> Result<Self::Ok> {
        let login = by.into_inner();
        Ok(self.tables().users.iter().find(|u| u.login == *login).cloned())
    }
}

impl Database<Insert<User>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(user): Insert<User>) -> Result<()> {
        self.tables().users.push(user);
        Ok(())
    }
}

impl Database<Select<By<Option<City>, location::CityId>>> for Mock {
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, location::CityId>>,
    ) -> Result<Self::Ok> {
        let id = by.into_inner();
        Ok(self.tables().cities.iter().find(|c| c.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Attribute>, Vec<attribute::Id>>>> for Mock {
    type Ok = Vec<Attribute>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attribute>, Vec<attribute::Id>>>,
    ) -> Result<Self::Ok> {
        let ids = by.into_inner();
        Ok(self
            .tables()
            .attributes
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }
}

impl Database<Lock<By<Billboard, Slug>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Lock<By<Billboard, Slug>>) -> Result<()> {
        Ok(())
    }
}

impl Database<Lock<By<Billboard, billboard::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Billboard, billboard::Id>>,
    ) -> Result<()> {
        Ok(())
    }
}

impl Database<Select<By<Option<Billboard>, billboard::Id>>> for Mock {
    type Ok = Option<Billboard>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Billboard>, billboard::Id>>,
    ) -> Result<Self::Ok> {
        let id = by.into_inner();
        Ok(self.tables().billboards.iter().find(|b| b.id == id).cloned())
    }
}

impl<'l> Database<Select<By<Option<Billboard>, &'l Slug>>> for Mock {
    type Ok = Option<Billboard>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Billboard>, &'l Slug>>,
    ) -> Result<Self::Ok> {
        let url = by.into_inner();
        Ok(self.tables().billboards.iter().find(|b| b.url == *url).cloned())
    }
}

impl Database<Insert<Billboard>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(b): Insert<Billboard>) -> Result<()> {
        self.tables().billboards.push(b);
        Ok(())
    }
}

impl Database<Update<Billboard>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Update(b): Update<Billboard>) -> Result<()> {
        let mut tables = self.tables();
        tables.billboards.retain(|existing| existing.id != b.id);
        tables.billboards.push(b);
        Ok(())
    }
}

impl Database<Select<By<Option<FinalPrice>, billboard::Id>>> for Mock {
    type Ok = Option<FinalPrice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<FinalPrice>, billboard::Id>>,
    ) -> Result<Self::Ok> {
        let id = by.into_inner();
        Ok(self
            .tables()
            .final_prices
            .iter()
            .find(|p| p.billboard_id == id)
            .copied())
    }
}

impl Database<Insert<FinalPrice>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(p): Insert<FinalPrice>) -> Result<()> {
        self.tables().final_prices.push(p);
        Ok(())
    }
}

impl Database<Update<FinalPrice>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Update(p): Update<FinalPrice>) -> Result<()> {
        let mut tables = self.tables();
        tables
            .final_prices
            .retain(|existing| existing.billboard_id != p.billboard_id);
        tables.final_prices.push(p);
        Ok(())
    }
}

impl Database<Insert<Vec<Image>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(images): Insert<Vec<Image>>) -> Result<()> {
        self.tables().images.extend(images);
        Ok(())
    }
}

impl Database<Delete<By<Vec<Image>, billboard::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vec<Image>, billboard::Id>>,
    ) -> Result<()> {
        let id = by.into_inner();
        self.tables().images.retain(|i| i.billboard_id != id);
        Ok(())
    }
}

impl
    Database<
        Select<
            By<read::billboard::list::Page, read::billboard::list::Selector>,
        >,
    > for Mock
{
    type Ok = read::billboard::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::billboard::list::Page, read::billboard::list::Selector>,
        >,
    ) -> Result<Self::Ok> {
        let read::billboard::list::Selector { arguments, filter } =
            by.into_inner();
        let tables = self.tables();
        Ok(read::billboard::list::Page::slice(
            arguments,
            tables
                .recent_billboards()
                .into_iter()
                .filter_map(|b| tables.summary(b))
                .filter(|s| filter.matches(s)),
        ))
    }
}

impl
    Database<
        Select<By<Vec<read::billboard::Summary>, read::billboard::Recent>>,
    > for Mock
{
    type Ok = Vec<read::billboard::Summary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::billboard::Summary>, read::billboard::Recent>,
        >,
    ) -> Result<Self::Ok> {
        let read::billboard::Recent { limit } = by.into_inner();
        let tables = self.tables();
        Ok(tables
            .recent_billboards()
            .into_iter()
            .filter_map(|b| tables.summary(b))
            .take(limit)
            .collect())
    }
}

impl
    Database<
        Select<
            By<read::billboard::admin::Page, read::billboard::admin::Selector>,
        >,
    > for Mock
{
    type Ok = read::billboard::admin::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::billboard::admin::Page, read::billboard::admin::Selector>,
        >,
    ) -> Result<Self::Ok> {
        let read::billboard::admin::Selector { arguments, filter } =
            by.into_inner();
        let tables = self.tables();
        Ok(read::billboard::admin::Page::slice(
            arguments,
            tables
                .recent_billboards()
                .into_iter()
                .filter_map(|b| tables.admin_row(b))
                .filter(|r| filter.matches(r)),
        ))
    }
}

pub(crate) mod fixture {
    //! Fixtures to fill a [`Mock`] with.

    use std::time::Duration;

    use common::{DateTime, Money};

    use crate::{
        command::create_billboard::Fields,
        domain::{
            billboard,
            location::{self, City, State},
            user::{self, Role},
            Attribute, Slug, User,
        },
        Config, Pricing, Service,
    };

    use super::Mock;

    /// Creates a new [`Service`] over the provided [`Mock`].
    pub(crate) fn service(db: &Mock) -> Service<Mock> {
        Service::new(
            Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                session_ttl: Duration::from_secs(60),
                pricing: Pricing::default(),
            },
            db.clone(),
        )
    }

    /// Parses [`Money`] out of the provided string.
    pub(crate) fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    /// Stores a new [`User`] with the provided [`Role`].
    pub(crate) fn user(db: &Mock, login: &str, role: Role) -> User {
        let user = User {
            id: user::Id::new(),
            name: user::Name::new(login).unwrap(),
            login: user::Login::new(login).unwrap(),
            password_hash: user::PasswordHash::new(
                &user::Password::new("correct horse").unwrap(),
            )
            .unwrap(),
            role,
            created_at: DateTime::now().coerce(),
        };
        db.tables().users.push(user.clone());
        user
    }

    /// Stores a new [`City`] along with its [`State`].
    pub(crate) fn city(db: &Mock, title: &str) -> City {
        let state = State {
            id: location::StateId::new(),
            title: location::Title::new("Tehran Province").unwrap(),
            url: Slug::new("tehran-province").unwrap(),
            created_at: DateTime::now().coerce(),
        };
        let city = City {
            id: location::CityId::new(),
            state_id: state.id,
            title: location::Title::new(title).unwrap(),
            url: Slug::from_title(title).unwrap(),
            created_at: DateTime::now().coerce(),
        };
        let mut tables = db.tables();
        tables.states.push(state);
        tables.cities.push(city.clone());
        city
    }

    /// Stores a new [`Attribute`].
    pub(crate) fn attribute(db: &Mock, name: &str) -> Attribute {
        let attribute = Attribute {
            id: crate::domain::attribute::Id::new(),
            name: crate::domain::attribute::Name::new(name).unwrap(),
        };
        db.tables().attributes.push(attribute.clone());
        attribute
    }

    /// Returns valid [`Fields`] of a [`Billboard`] in the [`City`] with the
    /// provided ID.
    ///
    /// [`Billboard`]: crate::domain::Billboard
    pub(crate) fn fields(
        city_id: location::CityId,
        title: &str,
        price: &str,
    ) -> Fields {
        Fields {
            city_id,
            name: billboard::Name::new(title).unwrap(),
            address: billboard::Address::new("12 Azadi St.").unwrap(),
            description: billboard::Description::new("").unwrap(),
            attributes: vec![],
            has_power: true,
            length: "12".parse().unwrap(),
            width: "4.5".parse().unwrap(),
            price: money(price),
            reservation_date: None,
            picture: None,
            map_iframe: None,
            title: billboard::Title::new(title).unwrap(),
            url: None,
            seo_description: billboard::SeoDescription::new("").unwrap(),
        }
    }
}
