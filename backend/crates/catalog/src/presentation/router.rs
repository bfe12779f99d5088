//! Catalog Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use auth::AuthAppState;
use auth::domain::repository::AccountRepository;
use auth::middleware::require_token;

use crate::domain::repository::{BookRepository, QuestionRepository};
use crate::presentation::handlers::{self, BookAppState, QuestionAppState};

/// Book routes; creation goes through Bearer authentication
pub fn book_router<A, B>(auth: AuthAppState<A>, state: BookAppState<B>) -> Router
where
    A: AccountRepository + Send + Sync + 'static,
    B: BookRepository + Send + Sync + 'static,
{
    let bearer = middleware::from_fn_with_state(auth, require_token::<A>);

    Router::new()
        .route(
            "/book",
            get(handlers::list_books::<B>)
                .merge(post(handlers::create_books::<B>).route_layer(bearer)),
        )
        .route("/book/{id}", get(handlers::get_book::<B>))
        .with_state(state)
}

/// Question routes; every mutation goes through Bearer authentication
pub fn question_router<A, Q>(auth: AuthAppState<A>, state: QuestionAppState<Q>) -> Router
where
    A: AccountRepository + Send + Sync + 'static,
    Q: QuestionRepository + Send + Sync + 'static,
{
    let bearer = middleware::from_fn_with_state(auth, require_token::<A>);

    Router::new()
        .route(
            "/question",
            get(handlers::list_questions::<Q>)
                .merge(post(handlers::create_question::<Q>).route_layer(bearer.clone())),
        )
        .route(
            "/question/{id}",
            put(handlers::update_question::<Q>)
                .delete(handlers::delete_question::<Q>)
                .route_layer(bearer),
        )
        .with_state(state)
}
