//! Domain aggregates exposed by the catalog service layer.

pub mod auth;
pub mod brand;
pub mod category;
pub mod product;
pub mod types;
pub mod user;
