//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Map (method, path shape) to a store operation or the proxy fallback
//! - Reject malformed ids before the store is reached
//! - Accumulate create/update bodies before invoking the store
//!
//! # Design Decisions
//! - The table is static; there is no per-listener routing
//! - Errors are turned into responses here and never propagate further

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ApiError;
use crate::http::server::AppState;
use crate::proxy;
use crate::routing::matcher::PathShape;
use crate::store::{parse_user_id, UserPayload};

/// Outcome of matching a request against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    ListUsers,
    GetUser(&'a str),
    CreateUser,
    UpdateUser(&'a str),
    DeleteUser(&'a str),
    /// No route matched; hand the request to the proxy dispatcher.
    Fallback,
}

impl<'a> Route<'a> {
    /// Match a method and URI path.
    pub fn resolve(method: &Method, path: &'a str) -> Self {
        match (method, PathShape::of(path)) {
            (&Method::GET, PathShape::Collection) => Route::ListUsers,
            (&Method::POST, PathShape::Collection) => Route::CreateUser,
            (&Method::GET, PathShape::Member(id)) => Route::GetUser(id),
            (&Method::PUT, PathShape::Member(id)) => Route::UpdateUser(id),
            (&Method::DELETE, PathShape::Member(id)) => Route::DeleteUser(id),
            _ => Route::Fallback,
        }
    }

    /// Stable name for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::ListUsers => "list_users",
            Route::GetUser(_) => "get_user",
            Route::CreateUser => "create_user",
            Route::UpdateUser(_) => "update_user",
            Route::DeleteUser(_) => "delete_user",
            Route::Fallback => "proxy",
        }
    }
}

/// Run the matched route to a response.
pub async fn dispatch(state: &AppState, route: Route<'_>, request: Request<Body>) -> Response {
    match handle(state, route, request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn handle(state: &AppState, route: Route<'_>, request: Request<Body>) -> Result<Response, ApiError> {
    let store = &state.store;
    let response = match route {
        Route::ListUsers => Json(store.list()).into_response(),
        Route::GetUser(id) => {
            parse_user_id(id)?;
            Json(store.get(id)?).into_response()
        }
        Route::CreateUser => {
            let payload = read_payload(request, state.max_body_size).await;
            (StatusCode::CREATED, Json(store.create(payload)?)).into_response()
        }
        Route::UpdateUser(id) => {
            parse_user_id(id)?;
            let payload = read_payload(request, state.max_body_size).await;
            Json(store.update(id, payload)?).into_response()
        }
        Route::DeleteUser(id) => {
            parse_user_id(id)?;
            Json(store.delete(id)?).into_response()
        }
        Route::Fallback => proxy::forward(state, request).await,
    };
    Ok(response)
}

/// Read the whole body and parse it as a user payload.
/// An unreadable body is treated like one without the required fields.
async fn read_payload(request: Request<Body>, limit: usize) -> UserPayload {
    match axum::body::to_bytes(request.into_body(), limit).await {
        Ok(bytes) => UserPayload::from_body(&bytes),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read request body");
            UserPayload::default()
        }
    }
}
