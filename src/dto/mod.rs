//! DTO modules that bridge services with templates and APIs.

pub mod brands;
pub mod catalog;
pub mod categories;
pub mod products;

/// Label shown for a missing category or brand.
pub const NOT_AVAILABLE: &str = "N/A";

/// Text form of an active flag.
pub fn status_label(is_active: bool) -> &'static str {
    if is_active { "Active" } else { "Inactive" }
}
