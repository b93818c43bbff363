//! Middleware for session-based authentication

use axum::{
    Extension,
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{debug, info};

use crate::{
    error::AppResult,
    session::{AuthenticatedUserId, TargetUrl},
    state::AppState,
};

/// Authentication state of the current request
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentUser {
    pub id: Option<i64>,
}

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

/// Resolve the session's user id into a [`CurrentUser`] request extension
///
/// A user id whose account no longer exists counts as anonymous.
pub async fn authenticate(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let mut current = CurrentUser::default();

    if let Some(id) = AuthenticatedUserId::get(&session).await? {
        if state.users.exists(id).await? {
            current.id = Some(id);
        } else {
            debug!("Session refers to missing user {}", id);
        }
    }

    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}

/// Send anonymous visitors to the login page
///
/// The requested path of a GET is remembered so login can return to it.
/// Pages behind this middleware are never cached.
pub async fn require_authentication(
    session: Session,
    Extension(current): Extension<CurrentUser>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    if !current.is_authenticated() {
        if req.method() == Method::GET {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or_else(|| req.uri().path());
            TargetUrl::insert(&session, target).await?;
        }

        info!("Anonymous request to {} redirected to login", req.uri().path());
        return Ok(Redirect::to("/user/login").into_response());
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}
