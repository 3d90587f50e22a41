//! Form definitions backing the admin and account routes.

use std::str::FromStr;

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use thiserror::Error;
use validator::ValidationErrors;

use crate::uploads::ImageUpload;

pub mod account;
pub mod brands;
pub mod categories;
pub mod products;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid {0}")]
    InvalidNumber(&'static str),

    #[error("price must be a positive amount with at most two decimals")]
    InvalidPrice,

    #[error("discount price must be a positive amount below the price")]
    InvalidDiscount,

    #[error("stock cannot be negative")]
    InvalidStock,

    #[error("invalid category")]
    InvalidCategory,

    #[error("invalid brand")]
    InvalidBrand,

    #[error("invalid sku")]
    InvalidSku,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("uploaded file is not an image")]
    NotAnImage,

    #[error("cannot read uploaded file: {0}")]
    Upload(#[from] std::io::Error),
}

/// Trimmed text of an optional multipart field; blank becomes `None`.
pub(crate) fn optional_text(value: Option<Text<String>>) -> Option<String> {
    value
        .map(Text::into_inner)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A checkbox counts as checked when it was submitted with a truthy value.
pub(crate) fn checkbox(value: &Option<Text<String>>) -> bool {
    value
        .as_ref()
        .is_some_and(|v| matches!(v.trim(), "true" | "on" | "1"))
}

pub(crate) fn parse_number<T: FromStr>(value: &str, field: &'static str) -> Result<T, FormError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidNumber(field))
}

/// Reads an uploaded image; an empty file input yields `None`.
pub(crate) fn read_upload(file: Option<TempFile>) -> Result<Option<ImageUpload>, FormError> {
    let Some(file) = file else {
        return Ok(None);
    };
    if file.size == 0 {
        return Ok(None);
    }
    if let Some(content_type) = &file.content_type
        && content_type.type_().as_str() != "image"
    {
        return Err(FormError::NotAnImage);
    }
    let content = std::fs::read(file.file.path())?;
    Ok(ImageUpload::new(file.file_name.unwrap_or_default(), content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_names_the_field() {
        assert_eq!(parse_number::<i32>(" 12 ", "stock").unwrap(), 12);
        let err = parse_number::<i32>("twelve", "stock").unwrap_err();
        assert_eq!(err.to_string(), "invalid stock");
    }

    #[test]
    fn checkbox_accepts_browser_values() {
        assert!(checkbox(&Some(Text("on".to_string()))));
        assert!(checkbox(&Some(Text("true".to_string()))));
        assert!(!checkbox(&Some(Text("false".to_string()))));
        assert!(!checkbox(&None));
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some(Text("  ".to_string()))), None);
        assert_eq!(
            optional_text(Some(Text(" SKU-1 ".to_string()))),
            Some("SKU-1".to_string())
        );
    }
}
