pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::{create_pool, DbPool};
pub use state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::accounts::register,
        handlers::accounts::register_federated,
        handlers::accounts::lookup,
        handlers::accounts::change_password,
        handlers::accounts::issue_otp,
        handlers::accounts::verify_otp,
        handlers::cart::add_to_cart,
        handlers::cart::remove_from_cart,
        handlers::cart::clear_cart,
        handlers::cart::add_to_wishlist,
        handlers::cart::remove_from_wishlist,
        handlers::orders::place_order,
        handlers::orders::list_orders,
        handlers::orders::cancel_order,
        handlers::orders::add_address,
        handlers::admin::login,
        handlers::admin::verify_token,
    ),
    tags(
        (name = "accounts", description = "Registration, lookup and passcodes"),
        (name = "cart", description = "Cart and wishlist reconciliation"),
        (name = "orders", description = "Order placement and cancellation"),
        (name = "admin", description = "Administrator token issuance"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(handlers::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
