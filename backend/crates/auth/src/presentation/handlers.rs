//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use platform::clock::Clock;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AccountDirectory, DeleteAccountUseCase, PasswordVerifier, RegisterUseCase,
    RequestAuthenticator, TokenManager, UpdateAccountUseCase,
};
use crate::domain::entity::Principal;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AccountResponse, RegisterRequest, UpdateAccountRequest};

/// Plain-text body returned by the mutating account endpoints
const SUCCESS: &str = "success";

/// Shared state for auth handlers and middleware
///
/// The authenticator and its collaborators are built once here and shared
/// by every request.
pub struct AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub authenticator: Arc<RequestAuthenticator<R>>,
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R> Clone for AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            repo: self.repo.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let repo = Arc::new(repo);
        let config = Arc::new(config);

        let authenticator = RequestAuthenticator::new(
            AccountDirectory::new(repo.clone()),
            TokenManager::new(repo.clone(), clock.clone(), config.clone()),
            PasswordVerifier::new(config.password_pepper.clone()),
        );

        Self {
            authenticator: Arc::new(authenticator),
            repo,
            config,
            clock,
        }
    }

    fn verifier(&self) -> PasswordVerifier {
        self.authenticator.verifier().clone()
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /user
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.verifier(),
        state.clock.clone(),
        state.config.clone(),
    );

    use_case.execute(req.into()).await?;

    Ok((StatusCode::OK, SUCCESS))
}

// ============================================================================
// Login
// ============================================================================

/// GET /login (Basic)
///
/// Issues a token, or hands back the current one while it is fresh.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    state.authenticator.issue_token(&principal).await?;

    let account = state
        .authenticator
        .directory()
        .find_by_id(principal.account_id)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    tracing::info!(account_id = %principal.account_id, "Signed in");

    Ok(Json(account.into()))
}

/// POST /logout (Bearer)
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    state.authenticator.revoke_token(&principal).await?;
    Ok((StatusCode::OK, SUCCESS))
}

// ============================================================================
// Profile
// ============================================================================

/// PUT /user (Bearer)
pub async fn update_account<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<UpdateAccountRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case =
        UpdateAccountUseCase::new(state.repo.clone(), state.verifier(), state.clock.clone());

    use_case.execute(principal.account_id, req.into()).await?;

    Ok((StatusCode::OK, SUCCESS))
}

/// DELETE /user (Bearer)
pub async fn delete_account<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    DeleteAccountUseCase::new(state.repo.clone())
        .execute(principal.account_id)
        .await?;

    Ok((StatusCode::OK, SUCCESS))
}
