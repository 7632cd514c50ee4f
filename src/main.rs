use actix_web::{web, App, HttpServer};
use rolodex::config;
use rolodex::db::DbService;
use rolodex::routes::{configure_routes, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::load();
    let addr = format!("0.0.0.0:{}", config.port);

    let db = Arc::new(
        DbService::new(&config.db_url)
            .await
            .expect("Failed to initialize database service"),
    );

    let state = AppState {
        db,
        salt: config.salt_token.clone(),
    };

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
