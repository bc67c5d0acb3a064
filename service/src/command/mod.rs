//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_attribute;
pub mod create_billboard;
pub mod create_city;
pub mod create_state;
pub mod create_user;
pub mod create_user_session;
pub mod update_billboard;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_attribute::CreateAttribute, create_billboard::CreateBillboard,
    create_city::CreateCity, create_state::CreateState,
    create_user::CreateUser, create_user_session::CreateUserSession,
    update_billboard::UpdateBillboard,
};
