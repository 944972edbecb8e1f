//! Resa Server - Restaurant Booking Administration
//!
//! REST API server for managing restaurant bookings, visitors and
//! availability, with staff notifications over Telegram.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::Bot;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resa_server::{
    api, bot,
    config::AppConfig,
    repository::Repository,
    services::notifier::{DisabledSink, NotificationSink, TelegramSink},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("resa_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Resa Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool.clone());

    // Telegram is optional: without it, booking alerts are logged and
    // dropped and the registration bot does not run.
    let sink: Arc<dyn NotificationSink> = if config.telegram.enabled {
        let telegram_bot = Bot::new(config.telegram.bot_token.clone());
        tokio::spawn(bot::run_registration_bot(
            telegram_bot.clone(),
            resa_server::services::staff::StaffService::new(Arc::new(repository.staff.clone())),
            config.telegram.registration_password.clone(),
        ));
        Arc::new(TelegramSink::new(telegram_bot))
    } else {
        tracing::info!("Telegram disabled, staff notifications will be dropped");
        Arc::new(DisabledSink)
    };

    let services = Services::new(repository, sink);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        pool,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Bookings
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/request", post(api::bookings::create_booking_request))
        .route("/bookings/queue", get(api::bookings::get_booking_queue))
        .route("/bookings/today", get(api::bookings::get_today_bookings))
        .route("/bookings/day", get(api::bookings::get_bookings_for_day))
        .route("/bookings/history", get(api::bookings::get_booking_history))
        .route("/bookings/status/:status", get(api::bookings::get_bookings_by_status))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id", put(api::bookings::update_booking))
        .route("/bookings/:id", delete(api::bookings::delete_booking))
        .route("/bookings/:id/status", patch(api::bookings::update_booking_status))
        .route("/bookings/:id/confirm", post(api::bookings::confirm_booking))
        .route("/bookings/:id/decline", post(api::bookings::decline_booking))
        .route("/bookings/:id/waitlist", post(api::bookings::wait_list_booking))
        .route("/bookings/:id/callagain", post(api::bookings::call_again_booking))
        // Visitors
        .route("/visitors", get(api::visitors::list_visitors))
        .route("/visitors", post(api::visitors::create_visitor))
        .route("/visitors/guests", get(api::visitors::list_guests))
        .route("/visitors/guests/bookings", get(api::visitors::list_guest_bookings))
        .route("/visitors/:id", get(api::visitors::get_visitor))
        .route("/visitors/:id", put(api::visitors::update_visitor))
        .route("/visitors/:id", delete(api::visitors::delete_visitor))
        // Disabled dates
        .route("/disabled-dates", get(api::disabled_dates::list_disabled_dates))
        .route("/disabled-dates", post(api::disabled_dates::create_disabled_date))
        .route("/disabled-dates/:id", get(api::disabled_dates::get_disabled_date))
        .route("/disabled-dates/:id", put(api::disabled_dates::update_disabled_date))
        .route("/disabled-dates/:id", delete(api::disabled_dates::delete_disabled_date))
        // Availability
        .route("/availability/date/:date", get(api::availability::check_date))
        .route("/availability/slot", get(api::availability::check_slot))
        .route(
            "/availability/disabled-slots",
            get(api::availability::list_disabled_slots),
        )
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        // Bare /health for load balancer probes
        .route("/health", get(api::health::health_check))
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
