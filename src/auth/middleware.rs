use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, Result};
use crate::models::{Account, Role};
use crate::state::AppState;

/// Verifies the bearer token and attaches the authenticated [`Account`] to
/// the request. Missing, malformed or stale credentials are all 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(req.headers()).ok_or(ApiError::Unauthorized)?;
    let claims = state.jwt.verify_access(token)?;

    let account = state
        .accounts
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}

/// Route layer restricting access to the given roles. Must run after
/// [`require_auth`].
pub async fn role_guard(req: Request, next: Next, allowed: &'static [Role]) -> Result<Response> {
    let account = req
        .extensions()
        .get::<Account>()
        .ok_or(ApiError::Unauthorized)?;

    if !allowed.contains(&account.role) {
        return Err(ApiError::forbidden("Forbidden: Insufficient role"));
    }

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Extractor for the account placed in extensions by [`require_auth`].
pub struct CurrentAccount(pub Account);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Account>()
            .cloned()
            .map(CurrentAccount)
            .ok_or(ApiError::Unauthorized)
    }
}
