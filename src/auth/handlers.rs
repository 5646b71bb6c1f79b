use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest, TokenResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{dummy_verify, hash_password, verify_password},
        repo::User,
    },
    config::IdentityField,
    error::{ApiError, Message},
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn required(value: Option<String>) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation("All fields are required".into())),
    }
}

// Characters, not bytes, so multi-byte passwords are measured fairly.
fn password_long_enough(password: &str, min_len: usize) -> bool {
    password.chars().count() >= min_len
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let username = required(payload.username)?;
    let password = required(payload.password)?;
    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());

    // The canonical identity field must be present even when optional
    // elsewhere.
    if state.config.auth.identity_field == IdentityField::Email && email.is_none() {
        return Err(ApiError::Validation("All fields are required".into()));
    }
    if let Some(email) = &email {
        if !is_valid_email(email) {
            warn!("invalid email at registration");
            return Err(ApiError::Validation("Invalid email".into()));
        }
    }
    if !password_long_enough(&password, state.config.auth.password_min_len) {
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;

    let user = User::create(&state.db, &username, email.as_deref(), &hash).await?;

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(Message::new("User registered successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let field = state.config.auth.identity_field;
    let identity = required(match field {
        IdentityField::Username => payload.username,
        IdentityField::Email => payload.email.map(|e| e.to_lowercase()),
    })?;
    let password = required(payload.password)?;

    let user = User::find_by_identity(&state.db, field, &identity).await?;

    // Unknown account still burns a verification so the two failure paths
    // are indistinguishable by timing or message.
    let user = match user {
        Some(u) => u,
        None => {
            tokio::task::spawn_blocking(move || dummy_verify(&password))
                .await
                .map_err(|e| ApiError::Internal(e.into()))?;
            warn!("login for unknown {}", field.as_str());
            return Err(ApiError::InvalidCredentials);
        }
    };

    let stored_hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;
    if !ok {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role.as_deref())?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, identity))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, identity.user_id)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    Ok(Json(PublicUser {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plausible_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_garbage() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(required(None).is_err());
        assert!(required(Some("   ".into())).is_err());
        assert_eq!(required(Some(" alice ".into())).unwrap(), "alice");
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // Three two-byte characters: six bytes but only three characters.
        let short = "äöü";
        assert_eq!(short.len(), 6);
        assert!(!password_long_enough(short, 6));

        assert!(password_long_enough("secret", 6));
        assert!(password_long_enough("äöüäöü", 6));
        assert!(!password_long_enough("pass", 6));
    }
}
