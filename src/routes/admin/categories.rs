use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::CategoryUploadForm;
use crate::repository::DieselRepository;
use crate::routes::admin::split_upload;
use crate::routes::{
    admin_failure, base_context, json_failure, page_failure, redirect, render_template,
};
use crate::services::categories;
use crate::uploads::LocalImageStore;

#[get("/categories")]
pub async fn list_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let categories = match categories::list_categories(repo.get_ref(), &user) {
        Ok(categories) => categories,
        Err(e) => return page_failure(e, "categories"),
    };

    let mut context = base_context(&flash_messages, Some(&user), "categories");
    context.insert("categories", &categories);

    render_template(&tera, "admin/categories/index.html", &context)
}

#[get("/categories/create")]
pub async fn show_create_category(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if !user.is_admin() {
        return redirect("/na");
    }

    let context = base_context(&flash_messages, Some(&user), "categories");
    render_template(&tera, "admin/categories/form.html", &context)
}

#[post("/categories/create")]
pub async fn create_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<CategoryUploadForm>,
) -> impl Responder {
    let back = "/admin/categories/create";
    let (form, image) = match split_upload(form.into_parts(), back, "create category") {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match categories::create_category(repo.get_ref(), store.get_ref(), &user, form, image) {
        Ok(category) => {
            FlashMessage::success(format!("Category '{}' created.", category.name)).send();
            redirect("/admin/categories")
        }
        Err(e) => admin_failure(e, back, "create category"),
    }
}

#[get("/categories/{category_id}/edit")]
pub async fn show_edit_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category =
        match categories::get_category(repo.get_ref(), &user, category_id.into_inner()) {
            Ok(category) => category,
            Err(e) => return page_failure(e, "category"),
        };

    let mut context = base_context(&flash_messages, Some(&user), "categories");
    context.insert("category", &category);

    render_template(&tera, "admin/categories/form.html", &context)
}

#[post("/categories/{category_id}/edit")]
pub async fn update_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<CategoryUploadForm>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    let back = format!("/admin/categories/{category_id}/edit");
    let (form, image) = match split_upload(form.into_parts(), &back, "update category") {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match categories::update_category(
        repo.get_ref(),
        store.get_ref(),
        &user,
        category_id,
        form,
        image,
    ) {
        Ok(category) => {
            FlashMessage::success(format!("Category '{}' updated.", category.name)).send();
            redirect(&format!("/admin/categories/{category_id}"))
        }
        Err(e) => admin_failure(e, &back, "update category"),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category =
        match categories::get_category(repo.get_ref(), &user, category_id.into_inner()) {
            Ok(category) => category,
            Err(e) => return page_failure(e, "category"),
        };

    let mut context = base_context(&flash_messages, Some(&user), "categories");
    context.insert("category", &category);

    render_template(&tera, "admin/categories/details.html", &context)
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
) -> impl Responder {
    match categories::delete_category(
        repo.get_ref(),
        store.get_ref(),
        &user,
        category_id.into_inner(),
    ) {
        Ok(()) => {
            FlashMessage::success("Category deleted.").send();
            redirect("/admin/categories")
        }
        Err(e) => admin_failure(e, "/admin/categories", "delete category"),
    }
}

#[post("/categories/{category_id}/toggle-status")]
pub async fn toggle_category_status(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::toggle_category_status(repo.get_ref(), &user, category_id.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => json_failure(e, "toggle category status"),
    }
}
