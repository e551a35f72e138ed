use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authors;
use super::handlers::books;
use super::handlers::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::users;
use super::middleware::authenticate as auth_middleware;
use crate::author::ports::AuthorServicePort;
use crate::book::ports::BookServicePort;
use crate::user::ports::UserServicePort;

/// Shared handler state. Services are held behind their ports so tests can
/// wire in alternative implementations.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub author_service: Arc<dyn AuthorServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(health::welcome))
        .route("/api/health", get(health::health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/refresh", get(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/authors", get(authors::list_authors))
        .route("/api/authors", post(authors::create_author))
        .route("/api/authors/:author_id", get(authors::get_author))
        .route("/api/authors/:author_id", patch(authors::update_author))
        .route("/api/authors/:author_id", delete(authors::delete_author))
        .route("/api/books", get(books::list_books))
        .route("/api/books", post(books::create_book))
        .route("/api/books/:book_id", get(books::get_book))
        .route("/api/books/:book_id", patch(books::update_book))
        .route("/api/books/:book_id", delete(books::delete_book))
        .route("/api/users", get(users::list_users))
        .route("/api/users", post(users::create_user))
        .route("/api/users/:user_id", get(users::get_user))
        .route("/api/users/:user_id", patch(users::update_user))
        .route("/api/users/:user_id", delete(users::delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(health::endpoint_not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
