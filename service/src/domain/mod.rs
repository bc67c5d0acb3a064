//! Domain definitions.

pub mod attribute;
pub mod billboard;
pub mod location;
pub mod slug;
pub mod user;

pub use self::{
    attribute::Attribute,
    billboard::Billboard,
    location::{City, State},
    slug::Slug,
    user::User,
};
