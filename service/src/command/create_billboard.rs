//! [`Command`] for creating a new [`Billboard`].

use common::{
    money::ArithmeticError,
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    Date, DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        attribute,
        billboard::{
            self,
            form::{Field, Inline},
            image::TooManyImages,
            FinalPrice, Image, Layout,
        },
        location, user, Attribute, Billboard, City, Slug, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Billboard`].
#[derive(Clone, Debug)]
pub struct CreateBillboard {
    /// ID of the [`User`] creating a new [`Billboard`].
    pub actor_id: user::Id,

    /// [`Fields`] of a new [`Billboard`].
    pub fields: Fields,

    /// ID of the [`User`] reselling a new [`Billboard`].
    ///
    /// Defaults to the actor, and may be set by admins only.
    pub reseller_id: Option<user::Id>,

    /// Surcharge of a new [`Billboard`]'s [`FinalPrice`].
    ///
    /// Accepted only if the [`Inline::FinalPrice`] is visible to the actor.
    pub surcharge: Option<Money>,

    /// Ordered gallery of a new [`Billboard`].
    pub images: Vec<billboard::image::Url>,
}

/// Editable fields of a [`Billboard`].
#[derive(Clone, Debug)]
pub struct Fields {
    /// ID of the [`City`] the [`Billboard`] is located in.
    pub city_id: location::CityId,

    /// Name of the [`Billboard`].
    pub name: billboard::Name,

    /// Address of the [`Billboard`].
    pub address: billboard::Address,

    /// Description of the [`Billboard`].
    pub description: billboard::Description,

    /// IDs of the [`Attribute`]s of the [`Billboard`].
    pub attributes: Vec<attribute::Id>,

    /// Indicator whether the [`Billboard`] has power available.
    pub has_power: bool,

    /// Length of the [`Billboard`].
    pub length: billboard::Dimension,

    /// Width of the [`Billboard`].
    pub width: billboard::Dimension,

    /// Base price of the [`Billboard`].
    pub price: Money,

    /// [`Date`] the [`Billboard`] is reserved until.
    pub reservation_date: Option<Date>,

    /// Main picture of the [`Billboard`].
    pub picture: Option<billboard::image::Url>,

    /// Map of the [`Billboard`] location.
    pub map_iframe: Option<billboard::MapIframe>,

    /// SEO title of the [`Billboard`].
    pub title: billboard::Title,

    /// URL [`Slug`] of the [`Billboard`].
    ///
    /// Derived from the `title` if not provided.
    pub url: Option<Slug>,

    /// SEO description of the [`Billboard`].
    pub seo_description: billboard::SeoDescription,
}

impl Fields {
    /// Returns the URL [`Slug`] of these [`Fields`], deriving it from the
    /// title if it's not provided.
    #[must_use]
    pub fn url(&self) -> Option<Slug> {
        self.url.clone().or_else(|| Slug::from_title(&self.title))
    }

    /// Checks the amounts of these [`Fields`] and the provided `surcharge`
    /// are not negative.
    ///
    /// # Errors
    ///
    /// With the first negative amount.
    pub fn check_amounts(
        &self,
        surcharge: Option<Money>,
    ) -> Result<(), NegativeAmount> {
        if self.price.is_negative() {
            return Err(NegativeAmount(self.price));
        }
        match surcharge {
            Some(s) if s.is_negative() => Err(NegativeAmount(s)),
            Some(_) | None => Ok(()),
        }
    }
}

/// Negative [`Money`] amount.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`{_0}` amount is negative")]
pub struct NegativeAmount(#[error(not(source))] pub Money);

impl<Db> Command<CreateBillboard> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<City>, location::CityId>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Attribute>, Vec<attribute::Id>>>,
            Ok = Vec<Attribute>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Lock<By<Billboard, Slug>>, Err = Traced<database::Error>>
        + for<'l> Database<
            Select<By<Option<Billboard>, &'l Slug>>,
            Ok = Option<Billboard>,
            Err = Traced<database::Error>,
        > + Database<Insert<Billboard>, Err = Traced<database::Error>>
        + Database<Insert<FinalPrice>, Err = Traced<database::Error>>
        + Database<Insert<Vec<Image>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Billboard;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBillboard,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBillboard {
            actor_id,
            fields,
            reseller_id,
            surcharge,
            images,
        } = cmd;

        fields
            .check_amounts(surcharge)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        Image::check_gallery_len(images.len())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let actor = self
            .database()
            .execute(Select(By::new(actor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(actor_id))
            .map_err(tracerr::wrap!())?;

        let layout = Layout::new(actor.role, None);
        if reseller_id.is_some() && !layout.has_field(Field::Reseller) {
            return Err(tracerr::new!(E::ResellerAssignmentForbidden));
        }
        if surcharge.is_some() && !layout.has_inline(Inline::FinalPrice) {
            return Err(tracerr::new!(E::SurchargeForbidden));
        }

        let reseller = match reseller_id {
            Some(id) if id != actor.id => self
                .database()
                .execute(Select(By::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(id))
                .map_err(tracerr::wrap!())?,
            Some(_) | None => actor,
        };

        drop(
            self.database()
                .execute(Select(By::new(fields.city_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::CityNotExists(fields.city_id))
                .map_err(tracerr::wrap!())?,
        );

        let mut billboard = Billboard {
            id: billboard::Id::new(),
            city_id: fields.city_id,
            attributes: vec![],
            has_power: fields.has_power,
            length: fields.length,
            width: fields.width,
            price: fields.price,
            reservation_date: fields.reservation_date,
            reseller_id: reseller.id,
            url: fields
                .url()
                .ok_or_else(|| E::UrlNotDerivable(fields.title.clone()))
                .map_err(tracerr::wrap!())?,
            name: fields.name,
            address: fields.address,
            description: fields.description,
            picture: fields.picture,
            map_iframe: fields.map_iframe,
            title: fields.title,
            seo_description: fields.seo_description,
            created_at: DateTime::now().coerce(),
        };
        billboard.set_attributes(fields.attributes);

        let found = self
            .database()
            .execute(Select(By::new(billboard.attributes.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(missing) = billboard
            .attributes
            .iter()
            .find(|id| !found.iter().any(|a| a.id == **id))
        {
            return Err(tracerr::new!(E::AttributeNotExists(*missing)));
        }

        let final_price = FinalPrice::new(
            billboard.id,
            billboard.price,
            reseller.role,
            surcharge,
            &self.config().pricing,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;
        let images = Image::gallery(billboard.id, images)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of `Billboard`s with the same URL.
        tx.execute(Lock(By::new(billboard.url.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        let occupied = tx
            .execute(Select(By::new(&billboard.url)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupied.is_some() {
            return Err(tracerr::new!(E::UrlOccupied(billboard.url)));
        }

        tx.execute(Insert(billboard.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(final_price))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(images))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "created `Billboard(id: {})` with `{}` final price",
            billboard.id,
            final_price.price,
        );

        Ok(billboard)
    }
}

/// Error of [`CreateBillboard`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`FinalPrice`] cannot be computed.
    #[display("Failed to compute `FinalPrice`: {_0}")]
    #[from]
    Pricing(ArithmeticError),

    /// Negative price or surcharge provided.
    #[display("{_0}")]
    #[from]
    NegativeAmount(NegativeAmount),

    /// Too many gallery images provided.
    #[display("{_0}")]
    #[from]
    TooManyImages(TooManyImages),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// Actor is not allowed to assign a reseller.
    #[display("Only admins may assign a reseller")]
    ResellerAssignmentForbidden,

    /// Actor is not allowed to set a surcharge.
    #[display("Surcharge cannot be set for this `Billboard`")]
    SurchargeForbidden,

    /// [`City`] with the provided ID does not exist.
    #[display("`City(id: {_0})` does not exist")]
    CityNotExists(#[error(not(source))] location::CityId),

    /// [`Attribute`] with the provided ID does not exist.
    #[display("`Attribute(id: {_0})` does not exist")]
    AttributeNotExists(#[error(not(source))] attribute::Id),

    /// URL [`Slug`] cannot be derived from the provided title.
    #[display("Cannot derive URL from `{_0}` title")]
    UrlNotDerivable(#[error(not(source))] billboard::Title),

    /// URL [`Slug`] is already occupied by another [`Billboard`].
    #[display("`{_0}` URL is occupied")]
    UrlOccupied(#[error(not(source))] Slug),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::{billboard::image, user::Role, Slug},
        infra::database::mock::{
            fixture::{attribute, city, fields, money, service, user},
            Mock,
        },
    };

    use super::{CreateBillboard, ExecutionError};

    #[tokio::test]
    async fn defaults_reseller_to_actor() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let city = city(&db, "Tehran");

        let billboard = service(&db)
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: fields(city.id, "Big Board 42!", "1000IRR"),
                reseller_id: None,
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap();

        assert_eq!(billboard.reseller_id, reseller.id);
        assert_eq!(billboard.url, Slug::new("big-board-42").unwrap());
        assert_eq!(db.tables().billboards.len(), 1);
    }

    #[tokio::test]
    async fn creates_final_price_with_billboard() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let reseller = user(&db, "reseller", Role::Reseller);
        let city = city(&db, "Tehran");

        let billboard = service(&db)
            .execute(CreateBillboard {
                actor_id: admin.id,
                fields: fields(city.id, "Azadi", "1000IRR"),
                reseller_id: Some(reseller.id),
                surcharge: Some(money("50IRR")),
                images: vec![],
            })
            .await
            .unwrap();

        let tables = db.tables();
        let price = tables
            .final_prices
            .iter()
            .find(|p| p.billboard_id == billboard.id)
            .unwrap();
        assert_eq!(price.price, money("1250IRR"));
        assert_eq!(price.surcharge, money("50IRR"));
    }

    #[tokio::test]
    async fn admin_owned_billboard_keeps_base_price() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let city = city(&db, "Tehran");

        let billboard = service(&db)
            .execute(CreateBillboard {
                actor_id: admin.id,
                fields: fields(city.id, "Azadi", "1000IRR"),
                reseller_id: None,
                surcharge: Some(money("50IRR")),
                images: vec![],
            })
            .await
            .unwrap();

        assert_eq!(billboard.reseller_id, admin.id);
        assert_eq!(db.tables().final_prices[0].price, money("1000IRR"));
    }

    #[tokio::test]
    async fn reseller_cannot_assign_reseller_or_surcharge() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let other = user(&db, "other", Role::Reseller);
        let city = city(&db, "Tehran");
        let svc = service(&db);

        let err = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: fields(city.id, "Azadi", "1000IRR"),
                reseller_id: Some(other.id),
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::ResellerAssignmentForbidden,
        ));

        let err = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: fields(city.id, "Azadi", "1000IRR"),
                reseller_id: None,
                surcharge: Some(money("50IRR")),
                images: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::SurchargeForbidden));
        assert!(db.tables().billboards.is_empty());
    }

    #[tokio::test]
    async fn rejects_occupied_url() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let city = city(&db, "Tehran");
        let svc = service(&db);
        let cmd = CreateBillboard {
            actor_id: reseller.id,
            fields: fields(city.id, "Azadi", "1000IRR"),
            reseller_id: None,
            surcharge: None,
            images: vec![],
        };

        drop(svc.execute(cmd.clone()).await.unwrap());
        let err = svc.execute(cmd).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::UrlOccupied(_)));
    }

    #[tokio::test]
    async fn validates_references_and_amounts() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let city = city(&db, "Tehran");
        let lit = attribute(&db, "lit");
        let svc = service(&db);

        let mut f = fields(city.id, "Azadi", "1000IRR");
        f.attributes = vec![lit.id, lit.id];
        let billboard = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: f,
                reseller_id: None,
                surcharge: None,
                images: ["/a.jpg", "/b.jpg"]
                    .map(|u| image::Url::new(u).unwrap())
                    .into(),
            })
            .await
            .unwrap();
        assert_eq!(billboard.attributes, [lit.id]);
        assert_eq!(db.tables().images.len(), 2);

        let mut f = fields(city.id, "Other", "1000IRR");
        f.attributes = vec![crate::domain::attribute::Id::new()];
        let err = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: f,
                reseller_id: None,
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::AttributeNotExists(_),
        ));

        let err = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: fields(city.id, "Negative", "-1IRR"),
                reseller_id: None,
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NegativeAmount(_)));

        let err = svc
            .execute(CreateBillboard {
                actor_id: reseller.id,
                fields: fields(city.id, "Crowded", "1000IRR"),
                reseller_id: None,
                surcharge: None,
                images: vec![
                    image::Url::new("/a.jpg").unwrap();
                    image::MAX_GALLERY_LEN + 1
                ],
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::TooManyImages(_)));
        assert!(db
            .tables()
            .billboards
            .iter()
            .all(|b| b.name.to_string() != "Crowded"));
    }
}
