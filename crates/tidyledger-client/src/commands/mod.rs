pub mod catalog;
pub mod clean;
pub(crate) mod common;
pub mod inspect;
