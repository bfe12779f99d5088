//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_basic, require_token};

/// Account routes: register, login, logout, profile update and delete
///
/// Each route carries its own authentication layer, so the router can be
/// merged next to unauthenticated routes.
pub fn account_router<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    let basic = middleware::from_fn_with_state(state.clone(), require_basic::<R>);
    let bearer = middleware::from_fn_with_state(state.clone(), require_token::<R>);

    Router::new()
        .route(
            "/user",
            post(handlers::register::<R>).merge(
                put(handlers::update_account::<R>)
                    .delete(handlers::delete_account::<R>)
                    .route_layer(bearer.clone()),
            ),
        )
        .route("/login", get(handlers::login::<R>).route_layer(basic))
        .route("/logout", post(handlers::logout::<R>).route_layer(bearer))
        .with_state(state)
}
