use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, insert_filter, page_failure, product_filter, render_template};
use crate::services::catalog;

#[get("/")]
pub async fn show_home(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match catalog::home_page(repo.get_ref()) {
        Ok(data) => data,
        Err(e) => return page_failure(e, "home page"),
    };

    let mut context = base_context(&flash_messages, user.as_ref(), "home");
    context.insert("featured_products", &data.featured_products);
    context.insert("categories", &data.categories);

    render_template(&tera, "catalog/index.html", &context)
}

#[get("/brands")]
pub async fn show_brands(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let brands = match catalog::active_brands(repo.get_ref()) {
        Ok(brands) => brands,
        Err(e) => return page_failure(e, "brands"),
    };

    let mut context = base_context(&flash_messages, user.as_ref(), "brands");
    context.insert("brands", &brands);

    render_template(&tera, "catalog/brands.html", &context)
}

#[get("/brands/{brand_id}")]
pub async fn show_brand(
    brand_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match catalog::brand_details(repo.get_ref(), brand_id.into_inner()) {
        Ok(data) => data,
        Err(e) => return page_failure(e, "brand"),
    };

    let mut context = base_context(&flash_messages, user.as_ref(), "brands");
    context.insert("brand", &data.brand);
    context.insert("products", &data.products);

    render_template(&tera, "catalog/brand.html", &context)
}

#[get("/brands/{brand_id}/products")]
pub async fn show_brand_products(
    req: HttpRequest,
    brand_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let filter = product_filter(&req);
    let (brand, products) =
        match catalog::brand_products(repo.get_ref(), brand_id.into_inner(), &filter) {
            Ok(result) => result,
            Err(e) => return page_failure(e, "brand products"),
        };

    let mut context = base_context(&flash_messages, user.as_ref(), "brands");
    context.insert("brand", &brand);
    context.insert("products", &products);
    insert_filter(&mut context, &filter);

    render_template(&tera, "catalog/brand_products.html", &context)
}

#[get("/categories/{category_id}/products")]
pub async fn show_category_products(
    req: HttpRequest,
    category_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let filter = product_filter(&req);
    let (category, products) =
        match catalog::category_products(repo.get_ref(), category_id.into_inner(), &filter) {
            Ok(result) => result,
            Err(e) => return page_failure(e, "category products"),
        };

    let mut context = base_context(&flash_messages, user.as_ref(), "home");
    context.insert("category", &category);
    context.insert("products", &products);
    insert_filter(&mut context, &filter);

    render_template(&tera, "catalog/category_products.html", &context)
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product = match catalog::product_details(repo.get_ref(), product_id.into_inner()) {
        Ok(product) => product,
        Err(e) => return page_failure(e, "product"),
    };

    let mut context = base_context(&flash_messages, user.as_ref(), "home");
    context.insert("product", &product);

    render_template(&tera, "catalog/product.html", &context)
}
