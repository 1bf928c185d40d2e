use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod api;
mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;

/// Shared request state: the process-wide database handle
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
}

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Bloglist API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to open database pool: {}", e));
    database::ensure_schema(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to prepare database schema: {}", e));

    let app = app(AppState { pool: pool.clone() });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Bloglist API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");

    database::close(pool).await;
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(post_routes())
        .merge(user_routes())
        .merge(login_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn post_routes() -> Router<AppState> {
    use handlers::posts;

    Router::new()
        .route("/posts", get(posts::post_list).post(posts::post_create))
        .route(
            "/posts/:id",
            get(posts::post_get)
                .put(posts::post_update)
                .delete(posts::post_delete),
        )
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new().route("/users", get(users::user_list).post(users::user_create))
}

fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::login::login_post))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Bloglist API",
        "version": version,
        "endpoints": {
            "posts": "/posts (public listing; POST/DELETE require a bearer token)",
            "users": "/users (public)",
            "login": "/login (public - token acquisition)",
            "health": "/health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "database": "ok",
                "timestamp": now,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "database_error": e.to_string(),
                "timestamp": now,
            })),
        ),
    }
}
