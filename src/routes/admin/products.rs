use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::products::ProductUploadForm;
use crate::repository::DieselRepository;
use crate::routes::admin::split_upload;
use crate::routes::{
    admin_failure, base_context, insert_filter, json_failure, page_failure, product_filter,
    redirect, render_template,
};
use crate::services::products;
use crate::uploads::LocalImageStore;

#[get("/products")]
pub async fn list_products(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let filter = product_filter(&req);

    let page = match products::list_products_paged(repo.get_ref(), &user, &filter) {
        Ok(page) => page,
        Err(e) => return page_failure(e, "products"),
    };
    let choices = match products::load_product_form(repo.get_ref(), &user, None) {
        Ok(choices) => choices,
        Err(e) => return page_failure(e, "product filters"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "products");
    context.insert("products", &page);
    insert_filter(&mut context, &filter);
    context.insert("categories", &choices.categories);
    context.insert("brands", &choices.brands);

    render_template(&tera, "admin/products/index.html", &context)
}

#[get("/products/create")]
pub async fn show_create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match products::load_product_form(repo.get_ref(), &user, None) {
        Ok(data) => data,
        Err(e) => return page_failure(e, "product form"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "products");
    context.insert("form", &data);

    render_template(&tera, "admin/products/form.html", &context)
}

#[post("/products/create")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<ProductUploadForm>,
) -> impl Responder {
    let back = "/admin/products/create";
    let (form, image) = match split_upload(form.into_parts(), back, "create product") {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match products::create_product(repo.get_ref(), store.get_ref(), &user, form, image) {
        Ok(product) => {
            FlashMessage::success(format!("Product '{}' created.", product.name)).send();
            redirect("/admin/products")
        }
        Err(e) => admin_failure(e, back, "create product"),
    }
}

#[get("/products/{product_id}/edit")]
pub async fn show_edit_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data =
        match products::load_product_form(repo.get_ref(), &user, Some(product_id.into_inner())) {
            Ok(data) => data,
            Err(e) => return page_failure(e, "product form"),
        };

    let mut context = base_context(&flash_messages, Some(&user), "products");
    context.insert("form", &data);

    render_template(&tera, "admin/products/form.html", &context)
}

#[post("/products/{product_id}/edit")]
pub async fn update_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<ProductUploadForm>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let back = format!("/admin/products/{product_id}/edit");
    let (form, image) = match split_upload(form.into_parts(), &back, "update product") {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match products::update_product(
        repo.get_ref(),
        store.get_ref(),
        &user,
        product_id,
        form,
        image,
    ) {
        Ok(product) => {
            FlashMessage::success(format!("Product '{}' updated.", product.name)).send();
            redirect(&format!("/admin/products/{product_id}"))
        }
        Err(e) => admin_failure(e, &back, "update product"),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product = match products::get_product(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(product) => product,
        Err(e) => return page_failure(e, "product"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "products");
    context.insert("product", &product);

    render_template(&tera, "admin/products/details.html", &context)
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
) -> impl Responder {
    match products::delete_product(
        repo.get_ref(),
        store.get_ref(),
        &user,
        product_id.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect("/admin/products")
        }
        Err(e) => admin_failure(e, "/admin/products", "delete product"),
    }
}

#[post("/products/{product_id}/toggle-featured")]
pub async fn toggle_featured(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::toggle_product_featured(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => json_failure(e, "toggle product featured flag"),
    }
}

#[post("/products/{product_id}/toggle-status")]
pub async fn toggle_status(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::toggle_product_status(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => json_failure(e, "toggle product status"),
    }
}
