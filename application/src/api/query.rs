//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        ctx.current_user().await.map(Into::into)
    }

    /// Returns the most recently added `Billboard`s for the landing page.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "recentBillboards",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn recent_billboards(
        ctx: &Context,
    ) -> Result<Vec<api::billboard::Summary>, Error> {
        ctx.service()
            .execute(query::billboards::Recent::by(
                read::billboard::Recent::default(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| items.into_iter().map(Into::into).collect())
    }

    /// Returns the `Billboard` with the specified URL slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BILLBOARD_NOT_EXISTS` - the `Billboard` with the specified URL slug
    ///                            does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "billboard",
            otel.name = Self::SPAN_NAME,
            url = %url,
        ),
    )]
    pub async fn billboard(
        url: api::scalar::Slug,
        ctx: &Context,
    ) -> Result<api::Billboard, Error> {
        ctx.service()
            .execute(query::billboard::ByUrl::by(url.as_ref()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| BillboardError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of all the `Billboard`s, most recent first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE` - the page number is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "billboards",
            otel.name = Self::SPAN_NAME,
            page = ?page,
        ),
    )]
    pub async fn billboards(
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::billboard::list::Page, Error> {
        list(ctx, page, read::billboard::list::Filter::All).await
    }

    /// Fetches the page of `Billboard`s located in the `City` with the
    /// specified URL slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE` - the page number is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cityBillboards",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            slug = %slug,
        ),
    )]
    pub async fn city_billboards(
        slug: api::scalar::Slug,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::billboard::list::Page, Error> {
        list(ctx, page, read::billboard::list::Filter::City(slug.into())).await
    }

    /// Fetches the page of `Billboard`s located in the `State` with the
    /// specified URL slug.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE` - the page number is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "stateBillboards",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            slug = %slug,
        ),
    )]
    pub async fn state_billboards(
        slug: api::scalar::Slug,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::billboard::list::Page, Error> {
        list(ctx, page, read::billboard::list::Filter::State(slug.into()))
            .await
    }

    /// Fetches the page of `Billboard`s whose name, address, `City` or
    /// `State` title contains the provided text case-insensitively.
    ///
    /// The text is trimmed before matching, so missing or blank text matches
    /// all the `Billboard`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE` - the page number is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "searchBillboards",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            q = ?q,
        ),
    )]
    pub async fn search_billboards(
        q: Option<String>,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::billboard::list::Page, Error> {
        list(ctx, page, read::billboard::list::Filter::search(q)).await
    }

    /// Returns all the `State`s ordered by title.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "states",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn states(ctx: &Context) -> Result<Vec<api::State>, Error> {
        ctx.service()
            .execute(query::location::States::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|states| states.into_iter().map(Into::into).collect())
    }

    /// Returns the `City`s ordered by title, optionally of the `State` with
    /// the specified URL slug only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cities",
            otel.name = Self::SPAN_NAME,
            state = ?state,
        ),
    )]
    pub async fn cities(
        state: Option<api::scalar::Slug>,
        ctx: &Context,
    ) -> Result<Vec<api::City>, Error> {
        ctx.service()
            .execute(query::location::Cities::by(
                read::location::CityFilter {
                    state: state.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cities| cities.into_iter().map(Into::into).collect())
    }

    /// Returns all the `Attribute`s ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "attributes",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn attributes(
        ctx: &Context,
    ) -> Result<Vec<api::Attribute>, Error> {
        ctx.service()
            .execute(query::attribute::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|attrs| attrs.into_iter().map(Into::into).collect())
    }

    /// Fetches the page of `Billboard`s managed by the authenticated `User`.
    ///
    /// Admins see all the `Billboard`s, while resellers see only their own.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authenticated;
    /// - `INVALID_PAGE` - the page number is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "adminBillboards",
            otel.name = Self::SPAN_NAME,
            page = ?page,
        ),
    )]
    pub async fn admin_billboards(
        page: Option<i32>,
        filter: Option<api::billboard::admin::Filter>,
        ctx: &Context,
    ) -> Result<api::billboard::admin::Page, Error> {
        let me = ctx.current_user().await?;
        let arguments = read::billboard::admin::Arguments::new(
            page,
            read::billboard::admin::PER_PAGE,
        )
        .ok_or_else(|| api::PaginationError::InvalidPage.into())
        .map_err(ctx.error())?;
        let scope = read::billboard::admin::Scope::by_reseller(&me);

        ctx.service()
            .execute(query::billboards::AdminList::by(
                read::billboard::admin::Selector {
                    arguments,
                    filter: filter.unwrap_or_default().into_read(scope),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the layout of the `Billboard` form as seen by the
    /// authenticated `User`.
    ///
    /// Omitted `id` means a form of a new `Billboard`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authenticated;
    /// - `BILLBOARD_NOT_EXISTS` - the `Billboard` with the specified ID does
    ///                            not exist or is not managed by the
    ///                            authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "billboardForm",
            id = ?id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn billboard_form(
        id: Option<api::billboard::Id>,
        ctx: &Context,
    ) -> Result<api::billboard::form::Layout, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::BillboardForm {
                actor_id: my_id.into(),
                billboard_id: id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// Fetches the page of the public `Billboard` list passing the provided
/// [`read::billboard::list::Filter`].
async fn list(
    ctx: &Context,
    page: Option<i32>,
    filter: read::billboard::list::Filter,
) -> Result<api::billboard::list::Page, Error> {
    let arguments = read::billboard::list::Arguments::new(
        page,
        read::billboard::list::PER_PAGE,
    )
    .ok_or_else(|| api::PaginationError::InvalidPage.into())
    .map_err(ctx.error())?;

    ctx.service()
        .execute(query::billboards::List::by(read::billboard::list::Selector {
            arguments,
            filter,
        }))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .map(Into::into)
}

impl AsError for query::billboard_form::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
            Self::BillboardNotExists(_) => {
                Some(BillboardError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum BillboardError {
        #[code = "BILLBOARD_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Billboard` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum LocationError {
        #[code = "STATE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`State` with the specified ID does not exist"]
        StateNotExists,

        #[code = "CITY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`City` with the specified ID does not exist"]
        CityNotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
