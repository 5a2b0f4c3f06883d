use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use std::sync::Arc;

use crate::{ServerError, auth::AuthConfig, categories, goals, reports, transactions, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub auth: Arc<AuthConfig>,
}

#[derive(serde::Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn require_bearer(
    auth_header: TypedHeader<Authorization<Bearer>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let user_id = state.auth.decode_token(auth_header.token())?;
    let user = state
        .engine
        .user_by_id(user_id)
        .await
        .map_err(|_| ServerError::Unauthorized)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub(crate) fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(users::me))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            axum::routing::delete(categories::remove),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            axum::routing::put(transactions::update).delete(transactions::remove),
        )
        .route("/dashboard", get(reports::dashboard))
        .route("/goals", get(goals::list).post(goals::create))
        .route(
            "/goals/{id}",
            axum::routing::put(goals::update).delete(goals::remove),
        )
        .route("/goals/{id}/plan", get(reports::goal_plan))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(users::register))
        .route("/auth/token", post(users::token))
        .merge(protected)
        .with_state(state)
}

pub async fn run(engine: Engine, auth: AuthConfig) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:8000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, auth, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    auth: AuthConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        auth: Arc::new(auth),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    auth: AuthConfig,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, auth, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
