//! Database models shared across the catalog repository.

pub mod brand;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod product;
pub mod user;
