//! Registration, login and current-user endpoints.

use api_types::user::{Register, TokenRequest, TokenResponse, UserView};
use axum::{Extension, Form, Json, extract::State, http::StatusCode};

use crate::{ServerError, auth, server::ServerState};

fn view_for(user: &engine::User) -> UserView {
    UserView {
        id: user.id,
        email: user.email.clone(),
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    if payload.password.is_empty() {
        return Err(ServerError::Generic("password must not be empty".to_string()));
    }

    let password_hash = auth::hash_password(&payload.password)?;
    let user = state.engine.create_user(&payload.email, &password_hash).await?;

    Ok((StatusCode::CREATED, Json(view_for(&user))))
}

/// Password login. Takes the urlencoded form used by OAuth2 password
/// clients, with the email in the `username` field.
pub async fn token(
    State(state): State<ServerState>,
    Form(payload): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ServerError> {
    let user = state
        .engine
        .user_by_email(&payload.username)
        .await?
        .ok_or(ServerError::Unauthorized)?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(ServerError::Unauthorized);
    }

    let access_token = state.auth.issue_token(user.id)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn me(Extension(user): Extension<engine::User>) -> Json<UserView> {
    Json(view_for(&user))
}
