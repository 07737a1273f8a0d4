use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{expenses, health, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the `/api` router around an engine.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/api/health", get(health::check))
        .route("/api/register", post(user::register))
        .route("/api/login", post(user::login))
        .route("/api/users", get(user::list))
        .route(
            "/api/users/{id}",
            get(user::get).put(user::update).delete(user::delete),
        )
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
