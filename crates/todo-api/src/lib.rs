//! HTTP surface of the todo service.
//!
//! REST routes under `/api/todos` plus the `/websocket` fan-out. Every
//! request loads the caller's whole list document, mutates it in memory,
//! rewrites it, and broadcasts the mutation.

pub mod error;
pub mod handlers;
pub mod models;
pub mod ws;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use infrastructure::TodoRepository;
use shared::{UserDid, USER_DID_HEADER};

use crate::error::ApiError;
use crate::ws::BroadcastHub;

#[derive(Clone)]
pub struct AppState {
    pub repo: TodoRepository,
    pub hub: BroadcastHub,
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/api/todos/:id",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/websocket", get(ws::websocket))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// The authenticated caller, taken from the header the platform gateway
/// sets after login.
pub struct AuthUser(pub UserDid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_DID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|did| !did.is_empty())
            .map(|did| AuthUser(UserDid::from_string(did.to_string())))
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("Missing {USER_DID_HEADER} header"))
            })
    }
}

/// JSON body extractor whose rejections use the same `{"error": ...}`
/// envelope as every other 400.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(request, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        add_cors_headers(&mut response);
        return response;
    }

    let mut response = next.run(request).await;
    add_cors_headers(&mut response);
    response
}

fn add_cors_headers(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,Authorization,x-user-did"),
    );
}
