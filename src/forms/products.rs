//! Product create/edit forms.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::{
    BrandId, CategoryId, Description, Price, ProductName, Sku, StockQuantity,
};
use crate::forms::{FormError, checkbox, optional_text, parse_number, read_upload};
use crate::uploads::ImageUpload;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Product fields submitted by the admin form.
pub struct ProductForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    /// Decimal text such as `1200.00`.
    pub price: String,
    #[serde(default)]
    pub discount_price: Option<String>,
    #[validate(range(min = 0))]
    pub stock: i32,
    pub category_id: i32,
    #[serde(default)]
    pub brand_id: Option<i32>,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(MultipartForm)]
/// Multipart body of the product create and edit pages.
pub struct ProductUploadForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub price: Text<String>,
    pub discount_price: Option<Text<String>>,
    pub stock: Text<String>,
    pub category_id: Text<String>,
    pub brand_id: Option<Text<String>>,
    pub sku: Option<Text<String>>,
    pub is_featured: Option<Text<String>>,
    pub is_active: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl ProductUploadForm {
    /// Splits the multipart body into the form fields and the optional image.
    pub fn into_parts(self) -> Result<(ProductForm, Option<ImageUpload>), FormError> {
        let is_featured = checkbox(&self.is_featured);
        let is_active = checkbox(&self.is_active);
        let brand_id = optional_text(self.brand_id)
            .map(|id| parse_number(&id, "brand"))
            .transpose()?;

        let form = ProductForm {
            name: self.name.into_inner(),
            description: optional_text(self.description).unwrap_or_default(),
            price: self.price.into_inner(),
            discount_price: optional_text(self.discount_price),
            stock: parse_number(&self.stock, "stock")?,
            category_id: parse_number(&self.category_id, "category")?,
            brand_id,
            sku: optional_text(self.sku),
            is_featured,
            is_active,
        };

        Ok((form, read_upload(self.image)?))
    }
}

/// Validated product fields.
#[derive(Debug, Clone)]
pub struct ProductPayload {
    pub name: ProductName,
    pub description: Description,
    pub price: Price,
    pub discount_price: Option<Price>,
    pub stock: StockQuantity,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    pub sku: Option<Sku>,
    pub is_featured: bool,
    pub is_active: bool,
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let price = Price::parse(&form.price).map_err(|_| FormError::InvalidPrice)?;
        let discount_price = form
            .discount_price
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Price::parse)
            .transpose()
            .map_err(|_| FormError::InvalidDiscount)?;
        if discount_price.is_some_and(|discount| discount >= price) {
            return Err(FormError::InvalidDiscount);
        }

        let sku = form
            .sku
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Sku::new)
            .transpose()
            .map_err(|_| FormError::InvalidSku)?;

        Ok(Self {
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: Description::new(form.description),
            price,
            discount_price,
            stock: StockQuantity::new(form.stock).map_err(|_| FormError::InvalidStock)?,
            category_id: CategoryId::new(form.category_id)
                .map_err(|_| FormError::InvalidCategory)?,
            brand_id: form
                .brand_id
                .map(BrandId::new)
                .transpose()
                .map_err(|_| FormError::InvalidBrand)?,
            sku,
            is_featured: form.is_featured,
            is_active: form.is_active,
        })
    }
}

impl ProductPayload {
    /// New products start active and not featured.
    pub fn into_new_product(self, image_url: Option<String>) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            discount_price: self.discount_price,
            stock: self.stock,
            image_url,
            category_id: self.category_id,
            brand_id: self.brand_id,
            sku: self.sku,
            is_featured: false,
            is_active: true,
        }
    }

    pub fn into_update(self, image_url: Option<String>, updated_at: NaiveDateTime) -> UpdateProduct {
        UpdateProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            discount_price: self.discount_price,
            stock: self.stock,
            image_url,
            category_id: self.category_id,
            brand_id: self.brand_id,
            sku: self.sku,
            is_featured: self.is_featured,
            is_active: self.is_active,
            updated_at,
        }
    }
}
