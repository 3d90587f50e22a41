use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::brands::BrandUploadForm;
use crate::repository::DieselRepository;
use crate::routes::admin::split_upload;
use crate::routes::{
    admin_failure, base_context, json_failure, page_failure, redirect, render_template,
};
use crate::services::brands;
use crate::uploads::LocalImageStore;

#[get("/brands")]
pub async fn list_brands(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let brands = match brands::list_brands(repo.get_ref(), &user) {
        Ok(brands) => brands,
        Err(e) => return page_failure(e, "brands"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "admin_brands");
    context.insert("brands", &brands);

    render_template(&tera, "admin/brands/index.html", &context)
}

#[get("/brands/create")]
pub async fn show_create_brand(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if !user.is_admin() {
        return redirect("/na");
    }

    let context = base_context(&flash_messages, Some(&user), "admin_brands");
    render_template(&tera, "admin/brands/form.html", &context)
}

#[post("/brands/create")]
pub async fn create_brand(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<BrandUploadForm>,
) -> impl Responder {
    let back = "/admin/brands/create";
    let (form, logo) = match split_upload(form.into_parts(), back, "create brand") {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match brands::create_brand(repo.get_ref(), store.get_ref(), &user, form, logo) {
        Ok(brand) => {
            FlashMessage::success(format!("Brand '{}' created.", brand.name)).send();
            redirect("/admin/brands")
        }
        Err(e) => admin_failure(e, back, "create brand"),
    }
}

#[get("/brands/{brand_id}/edit")]
pub async fn show_edit_brand(
    brand_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let brand = match brands::get_brand(repo.get_ref(), &user, brand_id.into_inner()) {
        Ok(brand) => brand,
        Err(e) => return page_failure(e, "brand"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "admin_brands");
    context.insert("brand", &brand);

    render_template(&tera, "admin/brands/form.html", &context)
}

#[post("/brands/{brand_id}/edit")]
pub async fn update_brand(
    brand_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<BrandUploadForm>,
) -> impl Responder {
    let brand_id = brand_id.into_inner();
    let back = format!("/admin/brands/{brand_id}/edit");
    let (form, logo) = match split_upload(form.into_parts(), &back, "update brand") {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match brands::update_brand(
        repo.get_ref(),
        store.get_ref(),
        &user,
        brand_id,
        form,
        logo,
    ) {
        Ok(brand) => {
            FlashMessage::success(format!("Brand '{}' updated.", brand.name)).send();
            redirect(&format!("/admin/brands/{brand_id}"))
        }
        Err(e) => admin_failure(e, &back, "update brand"),
    }
}

#[get("/brands/{brand_id}")]
pub async fn show_brand(
    brand_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let brand = match brands::get_brand(repo.get_ref(), &user, brand_id.into_inner()) {
        Ok(brand) => brand,
        Err(e) => return page_failure(e, "brand"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "admin_brands");
    context.insert("brand", &brand);

    render_template(&tera, "admin/brands/details.html", &context)
}

#[post("/brands/{brand_id}/delete")]
pub async fn delete_brand(
    brand_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
) -> impl Responder {
    match brands::delete_brand(
        repo.get_ref(),
        store.get_ref(),
        &user,
        brand_id.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Brand deleted.").send();
            redirect("/admin/brands")
        }
        Err(e) => admin_failure(e, "/admin/brands", "delete brand"),
    }
}

#[post("/brands/{brand_id}/toggle-status")]
pub async fn toggle_brand_status(
    brand_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match brands::toggle_brand_status(repo.get_ref(), &user, brand_id.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => json_failure(e, "toggle brand status"),
    }
}
