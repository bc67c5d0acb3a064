//! [`Billboard`]-related definitions.

use std::future;

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{command, domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A billboard advertising space.
#[derive(Clone, Debug, From)]
pub struct Billboard {
    /// ID of this [`Billboard`].
    id: Id,

    /// Underlying [`domain::Billboard`].
    billboard: OnceCell<domain::Billboard>,
}

impl From<domain::Billboard> for Billboard {
    fn from(billboard: domain::Billboard) -> Self {
        Self {
            id: billboard.id.into(),
            billboard: OnceCell::new_with(Some(billboard)),
        }
    }
}

impl Billboard {
    /// Creates a new [`Billboard`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Billboard`] with the provided ID exists,
    /// otherwise accessing this [`Billboard`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            billboard: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Billboard`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Billboard`] doesn't exist.
    async fn billboard(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Billboard, Error> {
        let id = self.id.into();
        self.billboard
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::billboard::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|b| {
                        future::ready(b.ok_or_else(|| {
                            api::query::BillboardError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A billboard advertising space.
#[graphql_object(context = Context)]
impl Billboard {
    /// Unique identifier of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.billboard(ctx).await?.name.clone().into())
    }

    /// Street address of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn address(&self, ctx: &Context) -> Result<Address, Error> {
        Ok(self.billboard(ctx).await?.address.clone().into())
    }

    /// Free-form description of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.billboard(ctx).await?.description.clone().into())
    }

    /// `City` this `Billboard` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<api::City, Error> {
        let city_id = self.billboard(ctx).await?.city_id;
        ctx.service()
            .execute(query::location::CityById::by(city_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::query::LocationError::CityNotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// `Attribute`s describing this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.attributes",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn attributes(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Attribute>, Error> {
        let ids = self.billboard(ctx).await?.attributes.clone();
        ctx.service()
            .execute(query::attribute::ByIds::by(ids))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|attrs| attrs.into_iter().map(Into::into).collect())
    }

    /// Indicator whether this `Billboard` has power available.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.hasPower",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn has_power(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.billboard(ctx).await?.has_power)
    }

    /// Length of this `Billboard` in meters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.length",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn length(&self, ctx: &Context) -> Result<Dimension, Error> {
        Ok(self.billboard(ctx).await?.length.into())
    }

    /// Width of this `Billboard` in meters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.width",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn width(&self, ctx: &Context) -> Result<Dimension, Error> {
        Ok(self.billboard(ctx).await?.width.into())
    }

    /// Base price of this `Billboard` set by its reseller.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.billboard(ctx).await?.price)
    }

    /// Price of this `Billboard` shown to customers.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.finalPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn final_price(
        &self,
        ctx: &Context,
    ) -> Result<Option<Money>, Error> {
        ctx.service()
            .execute(query::billboard::Price::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(|p| p.price))
    }

    /// Surcharge added on top of the commission of this `Billboard`.
    ///
    /// Visible to admins and the reseller of this `Billboard` only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.surcharge",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn surcharge(
        &self,
        ctx: &Context,
    ) -> Result<Option<Money>, Error> {
        let Some(me) = ctx.try_current_user().await? else {
            return Ok(None);
        };
        if !me.role.is_admin()
            && self.billboard(ctx).await?.reseller_id != me.id
        {
            return Ok(None);
        }

        ctx.service()
            .execute(query::billboard::Price::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(|p| p.surcharge))
    }

    /// `Date` this `Billboard` is reserved until, if it is.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.reservationDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn reservation_date(
        &self,
        ctx: &Context,
    ) -> Result<Option<Date>, Error> {
        Ok(self.billboard(ctx).await?.reservation_date)
    }

    /// `User` reselling this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.reseller",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn reseller(&self, ctx: &Context) -> Result<api::User, Error> {
        let reseller_id = self.billboard(ctx).await?.reseller_id;

        #[expect(
            unsafe_code,
            reason = "`reseller_id` is a foreign key to an existing `User`"
        )]
        let reseller = unsafe { api::User::new_unchecked(reseller_id) };
        Ok(reseller)
    }

    /// Main picture of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.picture",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn picture(
        &self,
        ctx: &Context,
    ) -> Result<Option<ImageUrl>, Error> {
        Ok(self.billboard(ctx).await?.picture.clone().map(Into::into))
    }

    /// Ordered gallery of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.images",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn images(&self, ctx: &Context) -> Result<Vec<ImageUrl>, Error> {
        ctx.service()
            .execute(query::billboard::Images::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|images| images.into_iter().map(|i| i.url.into()).collect())
    }

    /// Embeddable map showing the location of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.mapIframe",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn map_iframe(
        &self,
        ctx: &Context,
    ) -> Result<Option<MapIframe>, Error> {
        Ok(self.billboard(ctx).await?.map_iframe.clone().map(Into::into))
    }

    /// SEO title of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.billboard(ctx).await?.title.clone().into())
    }

    /// URL slug of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.url",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn url(&self, ctx: &Context) -> Result<scalar::Slug, Error> {
        Ok(self.billboard(ctx).await?.url.clone().into())
    }

    /// SEO description of this `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.seoDescription",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn seo_description(
        &self,
        ctx: &Context,
    ) -> Result<SeoDescription, Error> {
        Ok(self.billboard(ctx).await?.seo_description.clone().into())
    }

    /// `DateTime` when this `Billboard` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Billboard.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.billboard(ctx).await?.created_at.coerce())
    }
}

/// Editable fields of a `Billboard`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "BillboardInput")]
pub struct Input {
    /// ID of the `City` the `Billboard` is located in.
    pub city_id: api::location::CityId,

    /// Name of the `Billboard`.
    pub name: Name,

    /// Street address of the `Billboard`.
    pub address: Address,

    /// Free-form description of the `Billboard`, may be empty.
    pub description: Description,

    /// IDs of the `Attribute`s describing the `Billboard`.
    pub attributes: Vec<api::attribute::Id>,

    /// Indicator whether the `Billboard` has power available.
    pub has_power: bool,

    /// Length of the `Billboard` in meters.
    pub length: Dimension,

    /// Width of the `Billboard` in meters.
    pub width: Dimension,

    /// Base price of the `Billboard`.
    pub price: Money,

    /// `Date` the `Billboard` is reserved until.
    pub reservation_date: Option<Date>,

    /// Main picture of the `Billboard`.
    pub picture: Option<ImageUrl>,

    /// Embeddable map showing the location of the `Billboard`.
    pub map_iframe: Option<MapIframe>,

    /// SEO title of the `Billboard`.
    pub title: Title,

    /// URL slug of the `Billboard`.
    ///
    /// Derived from the `title` if omitted.
    pub url: Option<scalar::Slug>,

    /// SEO description of the `Billboard`, may be empty.
    pub seo_description: SeoDescription,
}

impl From<Input> for command::create_billboard::Fields {
    fn from(input: Input) -> Self {
        let Input {
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
            picture,
            map_iframe,
            title,
            url,
            seo_description,
        } = input;
        Self {
            city_id: city_id.into(),
            name: name.into(),
            address: address.into(),
            description: description.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
            has_power,
            length: length.into(),
            width: width.into(),
            price,
            reservation_date,
            picture: picture.map(Into::into),
            map_iframe: map_iframe.map(Into::into),
            title: title.into(),
            url: url.map(Into::into),
            seo_description: seo_description.into(),
        }
    }
}

/// Unique identifier of a `Billboard`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::billboard::Id)]
#[into(domain::billboard::Id)]
#[graphql(name = "BillboardId", transparent)]
pub struct Id(Uuid);

/// Name of a `Billboard`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardName",
    with = scalar::Via::<domain::billboard::Name>,
)]
pub struct Name(domain::billboard::Name);

/// Street address of a `Billboard`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardAddress",
    with = scalar::Via::<domain::billboard::Address>,
)]
pub struct Address(domain::billboard::Address);

/// Free-form description of a `Billboard`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardDescription",
    with = scalar::Via::<domain::billboard::Description>,
)]
pub struct Description(domain::billboard::Description);

/// SEO title of a `Billboard`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardTitle",
    with = scalar::Via::<domain::billboard::Title>,
)]
pub struct Title(domain::billboard::Title);

/// SEO description of a `Billboard`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardSeoDescription",
    with = scalar::Via::<domain::billboard::SeoDescription>,
)]
pub struct SeoDescription(domain::billboard::SeoDescription);

/// Embeddable `<iframe>` of a map showing a `Billboard` location.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardMapIframe",
    with = scalar::Via::<domain::billboard::MapIframe>,
)]
pub struct MapIframe(domain::billboard::MapIframe);

/// Positive length or width of a `Billboard` in meters.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BillboardDimension",
    with = scalar::Via::<domain::billboard::Dimension>,
)]
pub struct Dimension(domain::billboard::Dimension);

/// URL of a `Billboard` image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ImageUrl",
    with = scalar::Via::<domain::billboard::image::Url>,
)]
pub struct ImageUrl(domain::billboard::image::Url);

/// Public summary of a [`Billboard`].
#[derive(Clone, Debug, From)]
pub struct Summary(service::read::billboard::Summary);

/// Public summary of a `Billboard` along with its location.
#[graphql_object(name = "BillboardSummary", context = Context)]
impl Summary {
    /// Unique identifier of the `Billboard`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of the `Billboard`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Street address of the `Billboard`.
    #[must_use]
    pub fn address(&self) -> Address {
        self.0.address.clone().into()
    }

    /// URL slug of the `Billboard`.
    #[must_use]
    pub fn url(&self) -> scalar::Slug {
        self.0.url.clone().into()
    }

    /// Main picture of the `Billboard`.
    #[must_use]
    pub fn picture(&self) -> Option<ImageUrl> {
        self.0.picture.clone().map(Into::into)
    }

    /// Price of the `Billboard` shown to customers.
    #[must_use]
    pub fn final_price(&self) -> Option<Money> {
        self.0.final_price
    }

    /// `Date` the `Billboard` is reserved until, if it is.
    #[must_use]
    pub fn reservation_date(&self) -> Option<Date> {
        self.0.reservation_date
    }

    /// Title of the `City` the `Billboard` is located in.
    #[must_use]
    pub fn city_title(&self) -> api::location::Title {
        self.0.city.title.clone().into()
    }

    /// URL slug of the `City` the `Billboard` is located in.
    #[must_use]
    pub fn city_url(&self) -> scalar::Slug {
        self.0.city.url.clone().into()
    }

    /// Title of the `State` the `Billboard` is located in.
    #[must_use]
    pub fn state_title(&self) -> api::location::Title {
        self.0.state.title.clone().into()
    }

    /// URL slug of the `State` the `Billboard` is located in.
    #[must_use]
    pub fn state_url(&self) -> scalar::Slug {
        self.0.state.url.clone().into()
    }

    /// Full details of the `Billboard`.
    #[must_use]
    pub fn billboard(&self) -> Billboard {
        #[expect(
            unsafe_code,
            reason = "`Summary` loaded from repository guarantees \
                      `Billboard` existence"
        )]
        unsafe {
            Billboard::new_unchecked(self.0.id)
        }
    }

    /// `DateTime` when the `Billboard` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

pub mod list {
    //! Definitions related to the public [`Billboard`] list.

    use derive_more::{From, Into};
    use juniper::graphql_object;
    use service::read;

    #[cfg(doc)]
    use super::Billboard;
    use crate::Context;

    use super::Summary;

    /// Page of the public [`Billboard`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Page(read::billboard::list::Page);

    /// Page of the public `Billboard` list.
    #[graphql_object(name = "BillboardPage", context = Context)]
    impl Page {
        /// `BillboardSummary`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Summary> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// 1-based number of this page.
        #[must_use]
        pub fn number(&self) -> i32 {
            i32::try_from(self.0.number()).unwrap_or(i32::MAX)
        }

        /// Total number of pages.
        #[must_use]
        pub fn page_count(&self) -> i32 {
            i32::try_from(self.0.page_count()).unwrap_or(i32::MAX)
        }

        /// Total number of `Billboard`s on all the pages.
        #[must_use]
        pub fn total_count(&self) -> i32 {
            i32::try_from(self.0.total_count).unwrap_or(i32::MAX)
        }

        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.0.has_next()
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.0.has_previous()
        }
    }
}

pub mod admin {
    //! Definitions related to the management [`Billboard`] list.

    use common::{Date, Money};
    use derive_more::{From, Into};
    use juniper::{graphql_object, GraphQLInputObject};
    use read::billboard::admin::Reservation;
    use service::read;

    #[cfg(doc)]
    use super::Billboard;
    use crate::{api, Context};

    use super::{Address, Id, Name};

    /// Row of the management [`Billboard`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Row(read::billboard::admin::Row);

    /// Row of the management `Billboard` list.
    #[graphql_object(name = "AdminBillboardRow", context = Context)]
    impl Row {
        /// Unique identifier of the `Billboard`.
        #[must_use]
        pub fn id(&self) -> Id {
            self.0.id.into()
        }

        /// Name of the `Billboard`.
        #[must_use]
        pub fn name(&self) -> Name {
            self.0.name.clone().into()
        }

        /// Street address of the `Billboard`.
        #[must_use]
        pub fn address(&self) -> Address {
            self.0.address.clone().into()
        }

        /// `User` reselling the `Billboard`.
        #[must_use]
        pub fn reseller(&self) -> api::User {
            #[expect(
                unsafe_code,
                reason = "`Row` loaded from repository guarantees `User` \
                          existence"
            )]
            unsafe {
                api::User::new_unchecked(self.0.reseller_id)
            }
        }

        /// Name of the `User` reselling the `Billboard`.
        #[must_use]
        pub fn reseller_name(&self) -> api::user::Name {
            self.0.reseller_name.clone().into()
        }

        /// Title of the `City` the `Billboard` is located in.
        #[must_use]
        pub fn city_title(&self) -> api::location::Title {
            self.0.city_title.clone().into()
        }

        /// Indicator whether the `Billboard` has power available.
        #[must_use]
        pub fn has_power(&self) -> bool {
            self.0.has_power
        }

        /// Length of the `Billboard`.
        #[must_use]
        pub fn length(&self) -> super::Dimension {
            self.0.length.into()
        }

        /// Width of the `Billboard`.
        #[must_use]
        pub fn width(&self) -> super::Dimension {
            self.0.width.into()
        }

        /// `Date` the `Billboard` is reserved until, if it is.
        #[must_use]
        pub fn reservation_date(&self) -> Option<Date> {
            self.0.reservation_date
        }

        /// Price of the `Billboard` shown to customers.
        #[must_use]
        pub fn final_price(&self) -> Option<Money> {
            self.0.final_price
        }
    }

    /// Page of the management [`Billboard`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Page(read::billboard::admin::Page);

    /// Page of the management `Billboard` list.
    #[graphql_object(name = "AdminBillboardPage", context = Context)]
    impl Page {
        /// `AdminBillboardRow`s on this page.
        #[must_use]
        pub fn items(&self) -> Vec<Row> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// 1-based number of this page.
        #[must_use]
        pub fn number(&self) -> i32 {
            i32::try_from(self.0.number()).unwrap_or(i32::MAX)
        }

        /// Total number of pages.
        #[must_use]
        pub fn page_count(&self) -> i32 {
            i32::try_from(self.0.page_count()).unwrap_or(i32::MAX)
        }

        /// Total number of `Billboard`s on all the pages.
        #[must_use]
        pub fn total_count(&self) -> i32 {
            i32::try_from(self.0.total_count).unwrap_or(i32::MAX)
        }

        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.0.has_next()
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.0.has_previous()
        }
    }

    /// Filter of the management `Billboard` list.
    #[derive(Clone, Debug, Default, GraphQLInputObject)]
    #[graphql(name = "AdminBillboardFilter")]
    pub struct Filter {
        /// ID of the reselling `User` to filter by.
        pub reseller: Option<api::user::Id>,

        /// ID of the `City` to filter by.
        pub city: Option<api::location::CityId>,

        /// ID of the `Attribute` to filter by.
        pub attribute: Option<api::attribute::Id>,

        /// Power availability to filter by.
        pub has_power: Option<bool>,

        /// Reservation existence to filter by.
        pub reserved: Option<bool>,

        /// Range of `Date`s the `Billboard` is reserved until to filter by.
        ///
        /// Ignored if `reserved` is `false`.
        pub reserved_within: Option<DateRange>,

        /// Exact length to filter by.
        pub length: Option<super::Dimension>,

        /// Exact width to filter by.
        pub width: Option<super::Dimension>,

        /// Text to look for in the name, address, reseller name or `City`
        /// title.
        pub search: Option<String>,
    }

    /// Inclusive range of `Date`s.
    #[derive(Clone, Copy, Debug, GraphQLInputObject)]
    pub struct DateRange {
        /// Earliest `Date` of the range.
        pub from: Date,

        /// Latest `Date` of the range.
        pub to: Date,
    }

    impl Filter {
        /// Converts this [`Filter`] into a [`read::billboard::admin::Filter`]
        /// within the provided [`read::billboard::admin::Scope`].
        #[must_use]
        pub fn into_read(
            self,
            scope: read::billboard::admin::Scope,
        ) -> read::billboard::admin::Filter {
            let Self {
                reseller,
                city,
                attribute,
                has_power,
                reserved,
                reserved_within,
                length,
                width,
                search,
            } = self;
            let reservation = match (reserved, reserved_within) {
                (Some(false), _) => Some(Reservation::Free),
                (_, Some(DateRange { from, to })) => {
                    Some(Reservation::Until { from, to })
                }
                (Some(true), None) => Some(Reservation::Reserved),
                (None, None) => None,
            };
            read::billboard::admin::Filter {
                reseller: reseller.map(Into::into),
                city: city.map(Into::into),
                attribute: attribute.map(Into::into),
                has_power,
                reservation,
                length: length.map(Into::into),
                width: width.map(Into::into),
                search: search.and_then(read::billboard::SearchText::new),
                ..read::billboard::admin::Filter::new(scope)
            }
        }
    }
}

pub mod form {
    //! Definitions related to the [`Billboard`] form [`Layout`].

    use juniper::{graphql_object, GraphQLEnum};
    use service::domain::billboard::{form, Layout as DomainLayout};

    #[cfg(doc)]
    use super::Billboard;
    use crate::Context;

    /// Layout of the [`Billboard`] form as seen by an actor.
    #[derive(Clone, Debug)]
    pub struct Layout(DomainLayout);

    impl From<DomainLayout> for Layout {
        fn from(layout: DomainLayout) -> Self {
            Self(layout)
        }
    }

    /// Layout of the `Billboard` form as seen by the current `User`.
    #[graphql_object(name = "BillboardForm", context = Context)]
    impl Layout {
        /// Visible groups of fields, in order.
        #[must_use]
        pub fn sections(&self) -> Vec<Fieldset> {
            self.0.sections.iter().cloned().map(Fieldset).collect()
        }

        /// Visible sub-forms, in order.
        #[must_use]
        pub fn inlines(&self) -> Vec<Inline> {
            self.0.inlines.iter().copied().map(Into::into).collect()
        }
    }

    /// Group of fields shown together in a [`Billboard`] form.
    #[derive(Clone, Debug)]
    pub struct Fieldset(form::Fieldset);

    /// Group of fields shown together in a `Billboard` form.
    #[graphql_object(name = "BillboardFormSection", context = Context)]
    impl Fieldset {
        /// Kind of this section.
        #[must_use]
        pub fn section(&self) -> Section {
            self.0.section.into()
        }

        /// Rows of fields, where fields of a single row are shown side by
        /// side.
        #[must_use]
        pub fn rows(&self) -> Vec<Vec<Field>> {
            self.0
                .rows
                .iter()
                .map(|row| row.iter().copied().map(Into::into).collect())
                .collect()
        }
    }

    /// Group of fields in a `Billboard` form.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "BillboardFormSectionKind")]
    pub enum Section {
        /// Location and description.
        Description,

        /// Physical features and pricing.
        Features,

        /// Search engine metadata.
        Seo,
    }

    impl From<form::Section> for Section {
        fn from(section: form::Section) -> Self {
            match section {
                form::Section::Description => Self::Description,
                form::Section::Features => Self::Features,
                form::Section::Seo => Self::Seo,
            }
        }
    }

    /// Editable field of a `Billboard`.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "BillboardFormField")]
    pub enum Field {
        /// `City` the `Billboard` is located in.
        City,

        /// Name of the `Billboard`.
        Name,

        /// Street address of the `Billboard`.
        Address,

        /// `Attribute`s of the `Billboard`.
        Attributes,

        /// Free-form description of the `Billboard`.
        Description,

        /// Whether the `Billboard` has power available.
        HasPower,

        /// `User` reselling the `Billboard`.
        Reseller,

        /// Length of the `Billboard`.
        Length,

        /// Width of the `Billboard`.
        Width,

        /// Base price of the `Billboard`.
        Price,

        /// `Date` the `Billboard` is reserved until.
        ReservationDate,

        /// Main picture of the `Billboard`.
        Picture,

        /// Embedded map of the `Billboard` location.
        MapIframe,

        /// SEO title of the `Billboard`.
        Title,

        /// URL slug of the `Billboard`.
        Url,

        /// SEO description of the `Billboard`.
        SeoDescription,
    }

    impl From<form::Field> for Field {
        fn from(field: form::Field) -> Self {
            use form::Field as F;

            match field {
                F::City => Self::City,
                F::Name => Self::Name,
                F::Address => Self::Address,
                F::Attributes => Self::Attributes,
                F::Description => Self::Description,
                F::HasPower => Self::HasPower,
                F::Reseller => Self::Reseller,
                F::Length => Self::Length,
                F::Width => Self::Width,
                F::Price => Self::Price,
                F::ReservationDate => Self::ReservationDate,
                F::Picture => Self::Picture,
                F::MapIframe => Self::MapIframe,
                F::Title => Self::Title,
                F::Url => Self::Url,
                F::SeoDescription => Self::SeoDescription,
            }
        }
    }

    /// Sub-form of a `Billboard` form editing related records.
    #[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
    #[graphql(name = "BillboardFormInline")]
    pub enum Inline {
        /// Surcharge of the final price.
        FinalPrice,

        /// Ordered images of the `Billboard`.
        Image,
    }

    impl From<form::Inline> for Inline {
        fn from(inline: form::Inline) -> Self {
            match inline {
                form::Inline::FinalPrice => Self::FinalPrice,
                form::Inline::Image => Self::Image,
            }
        }
    }
}
