//! HTTP handlers and the helpers they share.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::products::ProductFilter;
use crate::services::ServiceError;

pub mod account;
pub mod admin;
pub mod api;
pub mod catalog;

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context with the alerts, the current user and the active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("is_admin", &user.is_some_and(AuthenticatedUser::is_admin));
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Reads a product filter from the query string; malformed values fall back to defaults.
pub fn product_filter(req: &HttpRequest) -> ProductFilter {
    serde_html_form::from_str(req.query_string()).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed product filter: {e}");
        ProductFilter::default()
    })
}

/// Adds the filter and the query string prefix that pagination links keep.
pub fn insert_filter(context: &mut Context, filter: &ProductFilter) {
    let unpaged = ProductFilter {
        page: None,
        ..filter.clone()
    };
    let prefix = match serde_html_form::to_string(&unpaged) {
        Ok(query) if !query.is_empty() => format!("{query}&"),
        _ => String::new(),
    };
    context.insert("filter", filter);
    context.insert("query_prefix", &prefix);
}

/// Maps a failed admin operation to a flash message and a redirect.
pub(crate) fn admin_failure(err: ServiceError, back: &str, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect("/na"),
        ServiceError::NotFound => {
            FlashMessage::error("The requested item was not found.").send();
            redirect(back)
        }
        ServiceError::Form(message)
        | ServiceError::Conflict(message)
        | ServiceError::Upload(message)
        | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        ServiceError::Internal(message) => {
            log::error!("Failed to {action}: {message}");
            FlashMessage::error(format!("Failed to {action}.")).send();
            redirect(back)
        }
    }
}

/// Maps a failed page load to a response without a body.
pub(crate) fn page_failure(err: ServiceError, what: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect("/na"),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("Failed to load {what}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Maps a failed JSON call to a bare status code.
pub(crate) fn json_failure(err: ServiceError, what: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().body(message)
        }
        err => {
            log::error!("Failed to {what}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    #[test]
    fn alert_levels_map_to_bootstrap_classes() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Warning), "warning");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
        assert_eq!(alert_level_to_str(&Level::Debug), "info");
    }

    #[test]
    fn redirect_sets_location() {
        let response = redirect("/admin/products");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/products"
        );
    }

    #[test]
    fn filter_is_read_from_query_string() {
        let req = actix_web::test::TestRequest::get()
            .uri("/api/v1/products?search=phone&category_id=&min_price=10&page=2")
            .to_http_request();

        let filter = product_filter(&req);
        assert_eq!(filter.search.as_deref(), Some("phone"));
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.min_price.as_deref(), Some("10"));
        assert_eq!(filter.page, Some(2));
    }

    #[test]
    fn pagination_prefix_drops_the_page() {
        let filter = ProductFilter {
            search: Some("phone".into()),
            page: Some(3),
            ..ProductFilter::default()
        };
        let mut context = Context::new();
        insert_filter(&mut context, &filter);

        let json = context.into_json();
        assert_eq!(json["query_prefix"], "search=phone&");
        assert_eq!(json["filter"]["page"], 3);
    }

    #[test]
    fn json_failures_use_status_codes() {
        assert_eq!(
            json_failure(ServiceError::Unauthorized, "x").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            json_failure(ServiceError::NotFound, "x").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            json_failure(ServiceError::Internal("db".into()), "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
