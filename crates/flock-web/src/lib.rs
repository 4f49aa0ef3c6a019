//! Flock Web Server
//!
//! Axum server hosting form sessions: a JSON API that drives each modal,
//! server-rendered pages on top of it, and a WebSocket carrying toasts.

pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post, put},
    Router,
};
use flock_core::FlockConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/forms", get(routes::forms::list_forms))
        .route("/forms/{key}/sessions", post(routes::forms::create_session))
        .route("/sessions/{id}", get(routes::sessions::get_session))
        .route("/sessions/{id}/values", put(routes::sessions::set_value))
        .route("/sessions/{id}/submit", post(routes::sessions::submit))
        .route("/sessions/{id}/open", post(routes::sessions::reopen))
        .route("/sessions/{id}/close", post(routes::sessions::close))
        .route(
            "/sessions/{id}/options/{field}",
            get(routes::sessions::search_options),
        )
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/forms/{key}/new", get(routes::pages::new_session))
        .route("/sessions/{id}", get(routes::pages::show_session))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(config: FlockConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let api = config.api_base_url.clone();
    let state = AppState::new(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!(backend = %api, "Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
