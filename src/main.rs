use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use warden_api::handlers::{self, AppState};
use warden_api::middleware::auth_middleware;
use warden_api::services::UserService;
use warden_api::store::MemoryUserStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up WARDEN_JWT_SECRET etc.
    let _ = dotenvy::dotenv();

    let config = warden_api::config::config();

    let default_filter = if config.server.enable_request_logging {
        "info,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("Starting Warden API in {:?} mode", config.environment);

    let state = AppState {
        users: UserService::new(Arc::new(MemoryUserStore::new())),
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Warden API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}

fn app(state: AppState) -> Router {
    let config = warden_api::config::config();

    let cors = if config.security.enable_cors {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Everything under /api requires a valid credential
        .merge(api_routes())
        .with_state(state)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    use handlers::{session, users};

    Router::new()
        .route("/api/whoami", get(session::whoami))
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Warden API",
            "version": version,
            "description": "CRUD API boilerplate with JWT auth and declarative permission guards",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "whoami": "/api/whoami (protected)",
                "users": "/api/users[/:id] (protected)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
