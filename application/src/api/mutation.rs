//! GraphQL [`Mutation`]s definitions.

use common::Money;
use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: api::user::Login,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `User` with the provided credentials and role.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the authenticated `User` is not an admin;
    /// - `LOGIN_OCCUPIED` - provided `UserLogin` is occupied by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            login = %login,
            name = %name,
            otel.name = Self::SPAN_NAME,
            role = ?role,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        login: api::user::Login,
        password: api::user::Password,
        role: api::user::Role,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::CreateUser {
                actor_id: Some(my_id.into()),
                name: name.into(),
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                role: role.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `State`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the authenticated `User` is not an admin;
    /// - `URL_NOT_DERIVABLE` - URL slug cannot be derived from the title;
    /// - `URL_OCCUPIED` - URL slug is occupied by another `State`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createState",
            otel.name = Self::SPAN_NAME,
            title = %title,
            url = ?url,
        ),
    )]
    pub async fn create_state(
        title: api::location::Title,
        url: Option<api::scalar::Slug>,
        ctx: &Context,
    ) -> Result<api::State, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::CreateState {
                actor_id: my_id.into(),
                title: title.into(),
                url: url.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `City` in the specified `State`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the authenticated `User` is not an admin;
    /// - `STATE_NOT_EXISTS` - the `State` with the specified ID does not
    ///                        exist;
    /// - `URL_NOT_DERIVABLE` - URL slug cannot be derived from the title;
    /// - `URL_OCCUPIED` - URL slug is occupied by another `City`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCity",
            otel.name = Self::SPAN_NAME,
            state_id = %state_id,
            title = %title,
            url = ?url,
        ),
    )]
    pub async fn create_city(
        state_id: api::location::StateId,
        title: api::location::Title,
        url: Option<api::scalar::Slug>,
        ctx: &Context,
    ) -> Result<api::City, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::CreateCity {
                actor_id: my_id.into(),
                state_id: state_id.into(),
                title: title.into(),
                url: url.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Attribute`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the authenticated `User` is not an admin;
    /// - `ATTRIBUTE_NAME_OCCUPIED` - provided name is occupied by another
    ///                               `Attribute`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createAttribute",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_attribute(
        name: api::attribute::Name,
        ctx: &Context,
    ) -> Result<api::Attribute, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::CreateAttribute {
                actor_id: my_id.into(),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Billboard` resold by the authenticated `User`, unless
    /// an admin assigns another reseller.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RESELLER_ASSIGNMENT_FORBIDDEN` - a non-admin assigns a reseller;
    /// - `SURCHARGE_FORBIDDEN` - the surcharge is not editable by the
    ///                           authenticated `User`;
    /// - `NEGATIVE_AMOUNT` - the price or the surcharge is negative;
    /// - `TOO_MANY_IMAGES` - more than 100 gallery images are provided;
    /// - `CURRENCY_MISMATCH` - the surcharge currency differs from the price
    ///                         one;
    /// - `CITY_NOT_EXISTS` - the specified `City` does not exist;
    /// - `ATTRIBUTE_NOT_EXISTS` - one of the specified `Attribute`s does not
    ///                            exist;
    /// - `URL_NOT_DERIVABLE` - URL slug cannot be derived from the title;
    /// - `URL_OCCUPIED` - URL slug is occupied by another `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createBillboard",
            name = %input.name,
            otel.name = Self::SPAN_NAME,
            reseller_id = ?reseller_id,
        ),
    )]
    pub async fn create_billboard(
        input: api::billboard::Input,
        reseller_id: Option<api::user::Id>,
        surcharge: Option<Money>,
        images: Option<Vec<api::billboard::ImageUrl>>,
        ctx: &Context,
    ) -> Result<api::Billboard, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::CreateBillboard {
                actor_id: my_id.into(),
                fields: input.into(),
                reseller_id: reseller_id.map(Into::into),
                surcharge,
                images: images
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Billboard` managed by the authenticated `User`.
    ///
    /// Omitted `surcharge` keeps the current one, and omitted `images` keep
    /// the current gallery.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BILLBOARD_NOT_EXISTS` - the `Billboard` does not exist or is not
    ///                            managed by the authenticated `User`;
    /// - `RESELLER_ASSIGNMENT_FORBIDDEN` - a non-admin assigns a reseller;
    /// - `SURCHARGE_FORBIDDEN` - the surcharge is not editable by the
    ///                           authenticated `User`;
    /// - `NEGATIVE_AMOUNT` - the price or the surcharge is negative;
    /// - `TOO_MANY_IMAGES` - more than 100 gallery images are provided;
    /// - `CURRENCY_MISMATCH` - the surcharge currency differs from the price
    ///                         one;
    /// - `CITY_NOT_EXISTS` - the specified `City` does not exist;
    /// - `ATTRIBUTE_NOT_EXISTS` - one of the specified `Attribute`s does not
    ///                            exist;
    /// - `URL_NOT_DERIVABLE` - URL slug cannot be derived from the title;
    /// - `URL_OCCUPIED` - URL slug is occupied by another `Billboard`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateBillboard",
            id = %id,
            otel.name = Self::SPAN_NAME,
            reseller_id = ?reseller_id,
        ),
    )]
    pub async fn update_billboard(
        id: api::billboard::Id,
        input: api::billboard::Input,
        reseller_id: Option<api::user::Id>,
        surcharge: Option<Money>,
        images: Option<Vec<api::billboard::ImageUrl>>,
        ctx: &Context,
    ) -> Result<api::Billboard, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(command::UpdateBillboard {
                actor_id: my_id.into(),
                billboard_id: id.into(),
                fields: input.into(),
                reseller_id: reseller_id.map(Into::into),
                surcharge,
                images: images
                    .map(|urls| urls.into_iter().map(Into::into).collect()),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOGIN_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserLogin` is occupied by another \
                             `User`"]
                LoginOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LoginOccupied(_) => Some(Error::LoginOccupied.into()),
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::PasswordHash(_) => None,
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::create_state::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::UrlNotDerivable(_) => Some(UrlError::NotDerivable.into()),
            Self::UrlOccupied(_) => Some(UrlError::Occupied.into()),
        }
    }
}

impl AsError for command::create_city::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::StateNotExists(_) => {
                Some(api::query::LocationError::StateNotExists.into())
            }
            Self::UrlNotDerivable(_) => Some(UrlError::NotDerivable.into()),
            Self::UrlOccupied(_) => Some(UrlError::Occupied.into()),
        }
    }
}

impl AsError for command::create_attribute::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ATTRIBUTE_NAME_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`AttributeName` is occupied by another \
                             `Attribute`"]
                NameOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::NameOccupied(_) => Some(Error::NameOccupied.into()),
        }
    }
}

impl AsError for command::create_billboard::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Pricing(e) => e.try_as_error(),
            Self::NegativeAmount(_) => {
                Some(BillboardError::NegativeAmount.into())
            }
            Self::TooManyImages(_) => {
                Some(BillboardError::TooManyImages.into())
            }
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::ResellerAssignmentForbidden => {
                Some(BillboardError::ResellerAssignmentForbidden.into())
            }
            Self::SurchargeForbidden => {
                Some(BillboardError::SurchargeForbidden.into())
            }
            Self::CityNotExists(_) => {
                Some(api::query::LocationError::CityNotExists.into())
            }
            Self::AttributeNotExists(_) => {
                Some(BillboardError::AttributeNotExists.into())
            }
            Self::UrlNotDerivable(_) => Some(UrlError::NotDerivable.into()),
            Self::UrlOccupied(_) => Some(UrlError::Occupied.into()),
        }
    }
}

impl AsError for command::update_billboard::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Pricing(e) => e.try_as_error(),
            Self::NegativeAmount(_) => {
                Some(BillboardError::NegativeAmount.into())
            }
            Self::TooManyImages(_) => {
                Some(BillboardError::TooManyImages.into())
            }
            Self::BillboardNotExists(_) => {
                Some(api::query::BillboardError::NotExists.into())
            }
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
            Self::ResellerAssignmentForbidden => {
                Some(BillboardError::ResellerAssignmentForbidden.into())
            }
            Self::SurchargeForbidden => {
                Some(BillboardError::SurchargeForbidden.into())
            }
            Self::CityNotExists(_) => {
                Some(api::query::LocationError::CityNotExists.into())
            }
            Self::AttributeNotExists(_) => {
                Some(BillboardError::AttributeNotExists.into())
            }
            Self::UrlNotDerivable(_) => Some(UrlError::NotDerivable.into()),
            Self::UrlOccupied(_) => Some(UrlError::Occupied.into()),
        }
    }
}

impl AsError for common::money::ArithmeticError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CURRENCY_MISMATCH"]
                #[status = BAD_REQUEST]
                #[message = "Amounts must be in the same currency"]
                CurrencyMismatch,
            }
        }

        match self {
            Self::CurrencyMismatch { .. } => {
                Some(Error::CurrencyMismatch.into())
            }
            Self::Overflow => None,
        }
    }
}

define_error! {
    enum BillboardError {
        #[code = "NEGATIVE_AMOUNT"]
        #[status = BAD_REQUEST]
        #[message = "Price and surcharge must not be negative"]
        NegativeAmount,

        #[code = "TOO_MANY_IMAGES"]
        #[status = BAD_REQUEST]
        #[message = "`Billboard` gallery cannot have more than 100 images"]
        TooManyImages,

        #[code = "RESELLER_ASSIGNMENT_FORBIDDEN"]
        #[status = FORBIDDEN]
        #[message = "Only admins may assign a reseller"]
        ResellerAssignmentForbidden,

        #[code = "SURCHARGE_FORBIDDEN"]
        #[status = FORBIDDEN]
        #[message = "Surcharge cannot be set for this `Billboard`"]
        SurchargeForbidden,

        #[code = "ATTRIBUTE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Attribute` with the specified ID does not exist"]
        AttributeNotExists,
    }
}

define_error! {
    enum UrlError {
        #[code = "URL_NOT_DERIVABLE"]
        #[status = BAD_REQUEST]
        #[message = "URL slug cannot be derived from the provided title"]
        NotDerivable,

        #[code = "URL_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "URL slug is occupied by another entity"]
        Occupied,
    }
}
