#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod identity;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod uploads;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::db::{establish_connection_pool, run_migrations};
    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::account::{
        logout, not_assigned, register, show_register, show_signin, signin,
    };
    use crate::routes::admin::{brands, categories, products};
    use crate::routes::api::{
        api_v1_all_products, api_v1_brand_count, api_v1_category_count, api_v1_category_products,
        api_v1_products,
    };
    use crate::routes::catalog::{
        show_brand, show_brand_products, show_brands, show_category_products, show_home,
        show_product,
    };
    use crate::services::seed::{seed_admin, seed_catalog};
    use crate::uploads::LocalImageStore;

    /// Seeds the admin account and the sample catalog when enabled.
    fn seed(repo: &DieselRepository, server_config: &ServerConfig) -> std::io::Result<()> {
        if !server_config.seed_data {
            return Ok(());
        }

        if let (Some(email), Some(password)) =
            (&server_config.admin_email, &server_config.admin_password)
        {
            seed_admin(repo, email, password)
                .map_err(|e| std::io::Error::other(format!("Failed to seed admin user: {e}")))?;
        }

        seed_catalog(repo)
            .map_err(|e| std::io::Error::other(format!("Failed to seed catalog: {e}")))
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        run_migrations(&pool)
            .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

        let repo = DieselRepository::new(pool);
        seed(&repo, &server_config)?;

        let store = LocalImageStore::new(&server_config.web_root);

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        let images_dir = format!("{}/images", server_config.web_root);

        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(server_config.cookie_secure)
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(Files::new("/images", &images_dir))
                .service(
                    web::scope("/api")
                        .service(api_v1_products)
                        .service(api_v1_all_products)
                        .service(api_v1_category_products)
                        .service(api_v1_category_count)
                        .service(api_v1_brand_count),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RedirectUnauthorized)
                        .service(products::list_products)
                        .service(products::show_create_product)
                        .service(products::create_product)
                        .service(products::show_edit_product)
                        .service(products::update_product)
                        .service(products::show_product)
                        .service(products::delete_product)
                        .service(products::toggle_featured)
                        .service(products::toggle_status)
                        .service(categories::list_categories)
                        .service(categories::show_create_category)
                        .service(categories::create_category)
                        .service(categories::show_edit_category)
                        .service(categories::update_category)
                        .service(categories::show_category)
                        .service(categories::delete_category)
                        .service(categories::toggle_category_status)
                        .service(brands::list_brands)
                        .service(brands::show_create_brand)
                        .service(brands::create_brand)
                        .service(brands::show_edit_brand)
                        .service(brands::update_brand)
                        .service(brands::show_brand)
                        .service(brands::delete_brand)
                        .service(brands::toggle_brand_status),
                )
                .service(show_signin)
                .service(signin)
                .service(show_register)
                .service(register)
                .service(logout)
                .service(not_assigned)
                .service(show_home)
                .service(show_brands)
                .service(show_brand)
                .service(show_brand_products)
                .service(show_category_products)
                .service(show_product)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
