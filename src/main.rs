mod api;
mod middleware;
mod models;
mod services;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::SessionGuard;
use crate::services::assistant_service::AssistantClient;
use crate::store::{FileStore, RecordStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3004".to_string());
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let frontend_origin =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    log::info!("🚀 Starting Campus Community Service...");
    log::info!("🗂️  Data directory: {}", data_dir);

    // Open the record store
    let file_store = FileStore::new(&data_dir)
        .await
        .expect("Failed to open record store");

    let store: Arc<dyn RecordStore> = Arc::new(file_store);
    let store_data: web::Data<dyn RecordStore> = web::Data::from(store);

    // Text-generation collaborator for FAQ bulk generation
    let assistant = web::Data::new(AssistantClient::from_env());

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(assistant.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Auth endpoints
            .service(
                web::scope("/api/v1/auth")
                    .route("/signup", web::post().to(api::auth::signup))
                    .route("/login", web::post().to(api::auth::login))
                    .route("/session", web::get().to(api::auth::session))
                    .service(
                        web::resource("/logout")
                            .wrap(SessionGuard::authenticated())
                            .route(web::post().to(api::auth::logout)),
                    )
                    .service(
                        web::resource("/me")
                            .wrap(SessionGuard::authenticated())
                            .route(web::get().to(api::auth::me)),
                    )
                    .service(
                        web::resource("/profile")
                            .wrap(SessionGuard::authenticated())
                            .route(web::put().to(api::auth::update_profile)),
                    ),
            )
            // Role-based navigation menu
            .route("/api/v1/navigation", web::get().to(api::navigation::get_menu))
            // Public event catalog
            .service(
                web::scope("/api/v1/events")
                    .service(api::events::list_events)
                    .service(api::events::get_event),
            )
            // Public FAQ catalog
            .service(web::scope("/api/v1/faqs").service(api::faqs::list_faqs))
            // Teacher dashboard: events, FAQs, inbox
            .service(
                web::scope("/api/v1/teacher")
                    .wrap(SessionGuard::teacher())
                    .service(api::events::my_events)
                    .service(api::events::create_event)
                    .service(api::events::update_event)
                    .service(api::events::delete_event)
                    .service(api::events::event_roster)
                    .service(api::faqs::create_faq)
                    .service(api::faqs::update_faq)
                    .service(api::faqs::delete_faq)
                    .service(api::faqs::generate_faqs)
                    .service(api::questions::inbox),
            )
            // Student dashboard: registrations and questions
            .service(
                web::scope("/api/v1/student")
                    .wrap(SessionGuard::student())
                    .service(api::events::register_for_event)
                    .service(api::events::my_registrations)
                    .service(api::questions::ask_question),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
