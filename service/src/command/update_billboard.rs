//! [`Command`] for updating an existing [`Billboard`].

use common::{
    money::ArithmeticError,
    operations::{
        By, Commit, Delete, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Money,
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

use super::{
    create_billboard::{Fields, NegativeAmount},
    Command,
};

/// [`Command`] for updating an existing [`Billboard`].
#[derive(Clone, Debug)]
pub struct UpdateBillboard {
    /// ID of the [`User`] updating the [`Billboard`].
    pub actor_id: user::Id,

    /// ID of the [`Billboard`] to update.
    pub billboard_id: billboard::Id,

    /// New [`Fields`] of the [`Billboard`].
    pub fields: Fields,

    /// ID of the [`User`] to reassign the [`Billboard`] to.
    ///
    /// May be set by admins only.
    pub reseller_id: Option<user::Id>,

    /// New surcharge of the [`Billboard`]'s [`FinalPrice`].
    ///
    /// Accepted only if the [`Inline::FinalPrice`] is visible to the actor.
    /// [`None`] keeps the current one.
    pub surcharge: Option<Money>,

    /// New ordered gallery of the [`Billboard`].
    ///
    /// [`None`] keeps the current one.
    pub images: Option<Vec<billboard::image::Url>>,
}

impl<Db> Command<UpdateBillboard> for Service<Db>
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
    Transacted<Db>: Database<
            Lock<By<Billboard, billboard::Id>>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Billboard, Slug>>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Billboard>, billboard::Id>>,
            Ok = Option<Billboard>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<Billboard>, &'l Slug>>,
            Ok = Option<Billboard>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<FinalPrice>, billboard::Id>>,
            Ok = Option<FinalPrice>,
            Err = Traced<database::Error>,
        > + Database<Update<Billboard>, Err = Traced<database::Error>>
        + Database<Insert<FinalPrice>, Err = Traced<database::Error>>
        + Database<Update<FinalPrice>, Err = Traced<database::Error>>
        + Database<
            Delete<By<Vec<Image>, billboard::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Vec<Image>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Billboard;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBillboard,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBillboard {
            actor_id,
            billboard_id,
            fields,
            reseller_id,
            surcharge,
            images,
        } = cmd;

        fields
            .check_amounts(surcharge)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        if let Some(urls) = &images {
            Image::check_gallery_len(urls.len())
                .map_err(tracerr::from_and_wrap!(=> E))?;
        }

        let actor = self
            .database()
            .execute(Select(By::new(actor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(actor_id))
            .map_err(tracerr::wrap!())?;

        drop(
            self.database()
                .execute(Select(By::new(fields.city_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::CityNotExists(fields.city_id))
                .map_err(tracerr::wrap!())?,
        );

        let mut attributes = fields.attributes.clone();
        attributes.sort_unstable();
        attributes.dedup();
        let found = self
            .database()
            .execute(Select(By::new(attributes.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(missing) =
            attributes.iter().find(|id| !found.iter().any(|a| a.id == **id))
        {
            return Err(tracerr::new!(E::AttributeNotExists(*missing)));
        }

        let url = fields
            .url()
            .ok_or_else(|| E::UrlNotDerivable(fields.title.clone()))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent updates of the same `Billboard`.
        tx.execute(Lock(By::new(billboard_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut billboard = tx
            .execute(Select(By::<Option<Billboard>, _>::new(billboard_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|b| actor.role.is_admin() || b.reseller_id == actor.id)
            .ok_or(E::BillboardNotExists(billboard_id))
            .map_err(tracerr::wrap!())?;

        let owner = if billboard.reseller_id == actor.id {
            actor.clone()
        } else {
            self.database()
                .execute(Select(By::new(billboard.reseller_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(billboard.reseller_id))
                .map_err(tracerr::wrap!())?
        };

        let layout = Layout::new(actor.role, Some(owner.role));
        if reseller_id.is_some() && !layout.has_field(Field::Reseller) {
            return Err(tracerr::new!(E::ResellerAssignmentForbidden));
        }
        if surcharge.is_some() && !layout.has_inline(Inline::FinalPrice) {
            return Err(tracerr::new!(E::SurchargeForbidden));
        }

        let reseller = match reseller_id {
            Some(id) if id == owner.id => owner,
            Some(id) if id == actor.id => actor,
            Some(id) => self
                .database()
                .execute(Select(By::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(id))
                .map_err(tracerr::wrap!())?,
            None => owner,
        };

        if url != billboard.url {
            // Avoid concurrent occupation of the same URL.
            tx.execute(Lock(By::new(url.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            let occupied = tx
                .execute(Select(By::new(&url)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if occupied.is_some_and(|b| b.id != billboard.id) {
                return Err(tracerr::new!(E::UrlOccupied(url)));
            }
        }

        let Fields {
            city_id,
            name,
            address,
            description,
            attributes: _,
            has_power,
            length,
            width,
            price,
            reservation_date,
            picture,
            map_iframe,
            title,
            url: _,
            seo_description,
        } = fields;
        billboard.city_id = city_id;
        billboard.name = name;
        billboard.address = address;
        billboard.description = description;
        billboard.attributes = attributes;
        billboard.has_power = has_power;
        billboard.length = length;
        billboard.width = width;
        billboard.price = price;
        billboard.reservation_date = reservation_date;
        billboard.reseller_id = reseller.id;
        billboard.picture = picture;
        billboard.map_iframe = map_iframe;
        billboard.title = title;
        billboard.url = url;
        billboard.seo_description = seo_description;

        tx.execute(Update(billboard.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let pricing = &self.config().pricing;
        let stored = tx
            .execute(Select(By::<Option<FinalPrice>, _>::new(billboard.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(mut final_price) = stored {
            let changed = final_price
                .reprice(billboard.price, reseller.role, surcharge, pricing)
                .map_err(tracerr::from_and_wrap!(=> E))?;
            if changed {
                tx.execute(Update(final_price))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
        } else {
            log::warn!(
                "`Billboard(id: {})` has no `FinalPrice`, creating one",
                billboard.id,
            );
            let final_price = FinalPrice::new(
                billboard.id,
                billboard.price,
                reseller.role,
                surcharge,
                pricing,
            )
            .map_err(tracerr::from_and_wrap!(=> E))?;
            tx.execute(Insert(final_price))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        if let Some(urls) = images {
            tx.execute(Delete(By::<Vec<Image>, _>::new(billboard.id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            let gallery = Image::gallery(billboard.id, urls)
                .map_err(tracerr::from_and_wrap!(=> E))?;
            tx.execute(Insert(gallery))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(billboard)
    }
}

/// Error of [`UpdateBillboard`] [`Command`] execution.
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

    /// [`Billboard`] with the provided ID does not exist or is not managed
    /// by the actor.
    #[display("`Billboard(id: {_0})` does not exist")]
    BillboardNotExists(#[error(not(source))] billboard::Id),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// Actor is not allowed to reassign the [`Billboard`].
    #[display("Only admins may assign a reseller")]
    ResellerAssignmentForbidden,

    /// Actor is not allowed to set a surcharge of the [`Billboard`].
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
        command::{Command as _, CreateBillboard},
        domain::{billboard, user::Role, Billboard, User},
        infra::database::mock::{
            fixture::{city, fields, money, service, user},
            Mock,
        },
    };

    use super::{ExecutionError, UpdateBillboard};

    async fn create(
        db: &Mock,
        actor: &User,
        reseller: Option<&User>,
        price: &str,
    ) -> Billboard {
        let city = city(db, "Tehran");
        service(db)
            .execute(CreateBillboard {
                actor_id: actor.id,
                fields: fields(city.id, "Azadi", price),
                reseller_id: reseller.map(|u| u.id),
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap()
    }

    fn update(actor: &User, b: &Billboard, price: &str) -> UpdateBillboard {
        let mut f = fields(b.city_id, &b.title.to_string(), price);
        f.url = Some(b.url.clone());
        UpdateBillboard {
            actor_id: actor.id,
            billboard_id: b.id,
            fields: f,
            reseller_id: None,
            surcharge: None,
            images: None,
        }
    }

    fn final_price(db: &Mock, id: billboard::Id) -> billboard::FinalPrice {
        *db.tables()
            .final_prices
            .iter()
            .find(|p| p.billboard_id == id)
            .unwrap()
    }

    #[tokio::test]
    async fn reprices_reseller_billboard() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let b = create(&db, &reseller, None, "1000IRR").await;
        assert_eq!(final_price(&db, b.id).price, money("1200IRR"));

        let updated = service(&db)
            .execute(update(&reseller, &b, "2000IRR"))
            .await
            .unwrap();

        assert_eq!(updated.price, money("2000IRR"));
        assert_eq!(final_price(&db, b.id).price, money("2400IRR"));
    }

    #[tokio::test]
    async fn admin_sets_surcharge_of_reseller_billboard() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let reseller = user(&db, "reseller", Role::Reseller);
        let b = create(&db, &reseller, None, "1000IRR").await;

        let mut cmd = update(&admin, &b, "1000IRR");
        cmd.surcharge = Some(money("50IRR"));
        drop(service(&db).execute(cmd).await.unwrap());

        let price = final_price(&db, b.id);
        assert_eq!(price.price, money("1250IRR"));
        assert_eq!(price.surcharge, money("50IRR"));

        // Surcharge is kept when not submitted.
        drop(
            service(&db)
                .execute(update(&reseller, &b, "1000IRR"))
                .await
                .unwrap(),
        );
        assert_eq!(final_price(&db, b.id).price, money("1250IRR"));
    }

    #[tokio::test]
    async fn changes_price_currency() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let reseller = user(&db, "reseller", Role::Reseller);
        let resold = create(&db, &admin, Some(&reseller), "1000IRR").await;
        let owned = service(&db)
            .execute(CreateBillboard {
                actor_id: admin.id,
                fields: fields(resold.city_id, "Enghelab", "1000IRR"),
                reseller_id: None,
                surcharge: None,
                images: vec![],
            })
            .await
            .unwrap();

        let mut cmd = update(&admin, &resold, "1000IRR");
        cmd.surcharge = Some(money("50IRR"));
        drop(service(&db).execute(cmd).await.unwrap());

        drop(
            service(&db)
                .execute(update(&reseller, &resold, "100USD"))
                .await
                .unwrap(),
        );
        let price = final_price(&db, resold.id);
        assert_eq!(price.price, money("120USD"));
        assert_eq!(price.surcharge, money("0USD"));

        drop(
            service(&db)
                .execute(update(&admin, &owned, "100USD"))
                .await
                .unwrap(),
        );
        assert_eq!(final_price(&db, owned.id).price, money("100USD"));
    }

    #[tokio::test]
    async fn surcharge_of_admin_billboard_is_forbidden() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let b = create(&db, &admin, None, "1000IRR").await;

        let mut cmd = update(&admin, &b, "1000IRR");
        cmd.surcharge = Some(money("50IRR"));
        let err = service(&db).execute(cmd).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::SurchargeForbidden));
    }

    #[tokio::test]
    async fn reassigning_to_admin_resets_final_price() {
        let db = Mock::default();
        let admin = user(&db, "admin", Role::Admin);
        let reseller = user(&db, "reseller", Role::Reseller);
        let b = create(&db, &admin, Some(&reseller), "1000IRR").await;
        assert_eq!(final_price(&db, b.id).price, money("1200IRR"));

        let mut cmd = update(&admin, &b, "1000IRR");
        cmd.reseller_id = Some(admin.id);
        let updated = service(&db).execute(cmd).await.unwrap();

        assert_eq!(updated.reseller_id, admin.id);
        assert_eq!(final_price(&db, b.id).price, money("1000IRR"));
    }

    #[tokio::test]
    async fn reseller_cannot_touch_foreign_billboard() {
        let db = Mock::default();
        let owner = user(&db, "owner", Role::Reseller);
        let other = user(&db, "other", Role::Reseller);
        let b = create(&db, &owner, None, "1000IRR").await;

        let err = service(&db)
            .execute(update(&other, &b, "1IRR"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::BillboardNotExists(_),
        ));
        assert_eq!(final_price(&db, b.id).price, money("1200IRR"));
    }

    #[tokio::test]
    async fn creates_missing_final_price() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let b = create(&db, &reseller, None, "1000IRR").await;
        db.tables().final_prices.clear();

        drop(
            service(&db)
                .execute(update(&reseller, &b, "1000IRR"))
                .await
                .unwrap(),
        );

        assert_eq!(final_price(&db, b.id).price, money("1200IRR"));
    }

    #[tokio::test]
    async fn replaces_gallery_within_limit() {
        let db = Mock::default();
        let reseller = user(&db, "reseller", Role::Reseller);
        let b = create(&db, &reseller, None, "1000IRR").await;
        let url = billboard::image::Url::new("/a.jpg").unwrap();

        let mut cmd = update(&reseller, &b, "1000IRR");
        cmd.images = Some(vec![url.clone(); 3]);
        drop(service(&db).execute(cmd).await.unwrap());
        assert_eq!(db.tables().images.len(), 3);

        let mut cmd = update(&reseller, &b, "1000IRR");
        cmd.images = Some(vec![url; billboard::image::MAX_GALLERY_LEN + 1]);
        let err = service(&db).execute(cmd).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::TooManyImages(_)));
        assert_eq!(db.tables().images.len(), 3);
    }
}
