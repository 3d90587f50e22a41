use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{json_failure, product_filter};
use crate::services::{brands, catalog, categories, products};

/// Paged product listing. Only admins see inactive products.
#[get("/v1/products")]
pub async fn api_v1_products(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let filter = product_filter(&req);

    match catalog::browse_products(repo.get_ref(), user.as_ref(), &filter) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => json_failure(e, "list products"),
    }
}

/// Every product, unpaged. Admins only.
#[get("/v1/products/all")]
pub async fn api_v1_all_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_all_products(repo.get_ref(), &user) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => json_failure(e, "list all products"),
    }
}

#[get("/v1/categories/{category_id}/products")]
pub async fn api_v1_category_products(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::category_product_list(repo.get_ref(), category_id.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => json_failure(e, "list category products"),
    }
}

#[get("/v1/categories/{category_id}/count")]
pub async fn api_v1_category_count(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::category_product_count(repo.get_ref(), category_id.into_inner()) {
        Ok(count) => HttpResponse::Ok().json(count),
        Err(e) => json_failure(e, "count category products"),
    }
}

#[get("/v1/brands/{brand_id}/count")]
pub async fn api_v1_brand_count(
    brand_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match brands::brand_product_count(repo.get_ref(), brand_id.into_inner()) {
        Ok(count) => HttpResponse::Ok().json(count),
        Err(e) => json_failure(e, "count brand products"),
    }
}
