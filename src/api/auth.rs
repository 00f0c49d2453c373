//! Registration, login, and the bearer-token middleware.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::db::{self, LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use crate::AppState;

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Register endpoint. Duplicate usernames are caught by the insert's UNIQUE
/// constraint, not a prior lookup, so concurrent submissions cannot race.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    // Hashing is CPU-heavy; keep it off the async workers
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| ApiError::internal("Server error"))?
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal("Server error")
        })?;

    db::users::create(&state.db, &request.username, &password_hash).await?;

    tracing::info!("Registered user: {}", request.username);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login endpoint. Unknown usernames and wrong passwords produce the same
/// response, so callers cannot probe which accounts exist.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    let user = db::users::find_by_username(&state.db, &request.username)
        .await?
        .ok_or_else(|| ApiError::validation("Invalid username or password"))?;

    let password = request.password;
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_| ApiError::internal("Server error"))?;

    if !verified {
        return Err(ApiError::validation("Invalid username or password"));
    }

    let token = state.tokens.issue(user.id, &user.username).map_err(|e| {
        tracing::error!("Token signing failed: {}", e);
        ApiError::internal("Server error")
    })?;

    Ok(Json(TokenResponse { token }))
}

/// Auth middleware for the protected routes. A missing or non-Bearer
/// Authorization header is 401; a token that fails verification is 403.
/// On success the resolved identity is attached to the request for the
/// downstream handler.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(ApiError::unauthorized("Access denied. No token provided.")),
    };

    let identity = state
        .tokens
        .verify(token)
        .map_err(|_| ApiError::forbidden("Invalid token."))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
