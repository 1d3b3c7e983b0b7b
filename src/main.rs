use actix_web::{web, App, HttpResponse, HttpServer};
use actix_cors::Cors;
use camp_explorer_server::auth::handlers::{login, signup};
use camp_explorer_server::camps::handlers::{
    create_camp, delete_camp, get_camp, get_camp_image, list_camps, update_camp,
};
use camp_explorer_server::config::CorsConfig;
use camp_explorer_server::{health_check, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

// Embedded images ride inside JSON bodies, so allow more than the
// actix default payload size
const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Service banner, useful as a smoke test from a browser
async fn api_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Camp Explorer API is running...",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn build_cors(config: &CorsConfig) -> Cors {
    if config.enabled {
        let cors = Cors::default();

        // Apply specific CORS rules based on configuration
        let cors = if config.allow_any_origin {
            cors.allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            // More restrictive CORS for production use
            cors.allowed_origin("http://localhost:3000")
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allowed_headers(vec!["Authorization", "Content-Type"])
                .supports_credentials()
        };

        cors.max_age(config.max_age as usize)
    } else {
        // CORS disabled - use most restrictive settings
        Cors::default()
    }
}

#[actix_web::main]
async fn main() -> camp_explorer_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration; this fails fast when no signing secret is set
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!("Starting server at {}:{}", config.server.host, config.server.port);

    // Initialize application state
    let state = AppState::new(config.clone()).await?;
    let state = web::Data::new(state);

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;

    let workers = config.server.workers as usize;
    let cors_settings = config.cors.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_settings))
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .route("/", web::get().to(api_info))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/auth")
                    .route("/signup", web::post().to(signup))
                    .route("/login", web::post().to(login)),
            )
            .service(
                web::scope("/api/camps")
                    .route("", web::get().to(list_camps))
                    .route("", web::post().to(create_camp))
                    .route("/{id}", web::get().to(get_camp))
                    .route("/{id}", web::put().to(update_camp))
                    .route("/{id}", web::delete().to(delete_camp))
                    .route("/{id}/image", web::get().to(get_camp_image)),
            )
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
