//! GraphQL API definitions.

pub mod attribute;
pub mod billboard;
pub mod location;
mod mutation;
pub(crate) mod query;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    attribute::Attribute,
    billboard::Billboard,
    location::{City, State},
    mutation::Mutation,
    query::Query,
    user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be an admin"]
        Admin,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGE"]
        #[status = BAD_REQUEST]
        #[message = "Page number must be positive"]
        InvalidPage,
    }
}
