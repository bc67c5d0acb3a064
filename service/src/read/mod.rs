//! Read entities definitions.

pub mod billboard;
pub mod location;
