use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::forms::account::{RegisterForm, SignInForm};
use crate::identity;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, account};

#[derive(Deserialize)]
struct ReturnUrlParams {
    return_url: Option<String>,
}

/// Signs `user` in and sends them to the local `return_url`.
fn start_session(
    req: &HttpRequest,
    user: &User,
    return_url: Option<&str>,
    server_config: &ServerConfig,
) -> HttpResponse {
    let claims = account::session_claims(user, server_config.session_ttl_hours);
    if let Err(e) = identity::login(req, &claims, &server_config.secret) {
        log::error!("Failed to start session for {}: {e}", user.email);
        FlashMessage::error("Failed to sign in.").send();
        return redirect("/auth/signin");
    }
    redirect(&account::safe_return_url(return_url))
}

/// Path of `page` that keeps the local `return_url`.
fn with_return_url(page: &str, return_url: Option<&str>) -> String {
    let target = account::safe_return_url(return_url);
    if target == "/" {
        return page.to_string();
    }
    match serde_html_form::to_string(&[("return_url", target.as_str())]) {
        Ok(query) => format!("{page}?{query}"),
        Err(_) => page.to_string(),
    }
}

#[get("/auth/signin")]
pub async fn show_signin(
    params: web::Query<ReturnUrlParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect(&account::safe_return_url(params.return_url.as_deref()));
    }

    let mut context = base_context(&flash_messages, None, "signin");
    context.insert(
        "return_url",
        &account::safe_return_url(params.return_url.as_deref()),
    );

    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn signin(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let return_url = form.return_url.clone();

    match account::sign_in(repo.get_ref(), form) {
        Ok(user) => {
            log::info!("User {} signed in", user.email);
            start_session(&req, &user, return_url.as_deref(), &server_config)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&with_return_url("/auth/signin", return_url.as_deref()))
        }
        Err(e) => {
            log::error!("Failed to sign in: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/auth/register")]
pub async fn show_register(
    params: web::Query<ReturnUrlParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }

    let mut context = base_context(&flash_messages, None, "register");
    context.insert(
        "return_url",
        &account::safe_return_url(params.return_url.as_deref()),
    );

    render_template(&tera, "auth/register.html", &context)
}

#[post("/auth/register")]
pub async fn register(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let return_url = form.return_url.clone();

    match account::register(repo.get_ref(), form) {
        Ok(user) => {
            FlashMessage::success("Welcome! Your account has been created.").send();
            start_session(&req, &user, return_url.as_deref(), &server_config)
        }
        Err(ServiceError::Form(message) | ServiceError::Conflict(message)) => {
            FlashMessage::error(message).send();
            redirect(&with_return_url("/auth/register", return_url.as_deref()))
        }
        Err(e) => {
            log::error!("Failed to register user: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/auth/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/")
}

#[get("/na")]
pub async fn not_assigned(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "na");
    render_template(&tera, "auth/access_denied.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_url_is_carried_between_pages() {
        assert_eq!(with_return_url("/auth/signin", None), "/auth/signin");
        assert_eq!(
            with_return_url("/auth/signin", Some("/admin/brands")),
            "/auth/signin?return_url=%2Fadmin%2Fbrands"
        );
        assert_eq!(
            with_return_url("/auth/signin", Some("https://evil.example")),
            "/auth/signin"
        );
    }
}
