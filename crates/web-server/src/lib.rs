use axum::{
    Router,
    routing::{get, post},
};
use configuration::Settings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

impl AppState {
    pub fn new(db_repo: DbRepository) -> Self {
        Self { db_repo }
    }
}

/// Builds the router with every endpoint and middleware attached.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/heroes", get(handlers::get_heroes))
        .route("/heroes/:id", get(handlers::get_hero))
        .route("/powers", get(handlers::get_powers))
        .route(
            "/powers/:id",
            get(handlers::get_power).patch(handlers::update_power),
        )
        .route("/hero_powers", post(handlers::create_hero_power))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to the store, applies migrations and serves until the process
/// is stopped.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app = app(Arc::new(AppState::new(db_repo)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
