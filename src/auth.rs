use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use sqlx::SqlitePool;

use crate::{
    users::model::{self, SafeUser},
    ApiError,
};

/// Extractor for the user behind the `Authorization: Bearer <token>` header.
///
/// Handlers that take this reject unauthenticated requests with 401 before
/// any of their own logic runs.
pub struct AuthUser(pub SafeUser);

impl<S> FromRequestParts<S> for AuthUser
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiError::Unauthorized("missing bearer token"))?;

        let db_pool = SqlitePool::from_ref(state);
        let user = model::get_user_by_token(&db_pool, token)
            .await?
            .ok_or(ApiError::Unauthorized("invalid user token"))?;

        Ok(AuthUser(user))
    }
}

/// Some clients send `bearer` in lowercase, so match the scheme case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::bearer_token;

    #[test]
    fn accepts_any_scheme_casing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER abc"), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
