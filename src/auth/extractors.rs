use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// Claims decoded for the current request. Lives only as long as the
/// request; nothing is shared across requests.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Option<String>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Requires a valid token; rejects before any handler runs. The
/// Authorization header carries the raw token value; a `Bearer ` prefix is
/// tolerated since some clients send it.
pub struct AuthUser(pub Identity);

/// Same as [`AuthUser`] plus the admin role claim. A valid token without
/// the role gets the exact same rejection as an invalid token, so the
/// response never reveals that an admin surface exists.
pub struct AdminUser(pub Identity);

fn identity_from_parts(parts: &Parts, keys: &JwtKeys) -> Result<Identity, ApiError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }

    let claims = keys.verify(token).map_err(|_| ApiError::InvalidToken)?;
    Ok(Identity {
        user_id: claims.sub,
        role: claims.role,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        identity_from_parts(parts, &keys).map(AuthUser)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let identity = identity_from_parts(parts, &keys)?;
        if !identity.is_admin() {
            return Err(ApiError::InvalidToken);
        }
        Ok(AdminUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::{header::AUTHORIZATION, Request};

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_header_is_token_required() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_uniformly() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("definitely-not-a-jwt"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn raw_token_value_is_accepted() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, None).unwrap();

        let mut parts = parts_with_auth(Some(&token));
        let AuthUser(identity) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(identity.user_id, user_id);
        assert!(!identity.is_admin());
    }

    #[tokio::test]
    async fn bearer_prefix_is_tolerated() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, None).unwrap();

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthUser(identity) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(identity.user_id, user_id);
    }

    #[tokio::test]
    async fn admin_extractor_accepts_admin_role() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign(Uuid::new_v4(), Some("admin")).unwrap();

        let mut parts = parts_with_auth(Some(&token));
        let AdminUser(identity) = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn admin_extractor_rejects_plain_user_like_invalid_token() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign(Uuid::new_v4(), None).unwrap();

        let mut parts = parts_with_auth(Some(&token));
        let err = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .map(|_| ())
            .unwrap_err();
        // Indistinguishable from a bad token.
        assert!(matches!(err, ApiError::InvalidToken));
    }
}
