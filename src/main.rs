use std::sync::Arc;

use commerce_service::config::Config;
use commerce_service::infrastructure::smtp::SmtpNotificationGateway;
use commerce_service::{build_server, create_pool, run_migrations, AppState};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let pool = create_pool(&config.database_url);
    run_migrations(&pool);

    let notifier = Arc::new(
        SmtpNotificationGateway::new(&config.smtp).expect("Failed to build SMTP transport"),
    );
    let state = AppState::new(pool, &config, notifier);

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
