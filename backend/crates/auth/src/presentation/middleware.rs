//! Auth Middleware
//!
//! Route layers that authenticate the request and attach the resulting
//! [`Principal`] to its extensions. Handlers behind them read it with
//! `Extension<Principal>`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::credentials::{extract_basic, extract_bearer};

use crate::domain::entity::Principal;
use crate::domain::repository::AccountRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Require `Authorization: Basic`
pub async fn require_basic<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let credentials = extract_basic(req.headers()).map_err(|e| {
        tracing::debug!(error = %e, "Basic credentials rejected");
        AuthError::InvalidCredentials
    })?;

    let principal = state
        .authenticator
        .authenticate_basic(&credentials.identifier, &credentials.secret)
        .await?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Require `Authorization: Bearer` with a live token
pub async fn require_token<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let token = extract_bearer(req.headers()).map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        AuthError::InvalidToken
    })?;

    let principal: Principal = state.authenticator.authenticate_token(&token).await?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
