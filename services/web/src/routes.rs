//! Snippetbox routes

use axum::{
    Router,
    http::{HeaderValue, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::{
    handlers::{
        about,
        account::{account_password_update, account_password_update_post, account_view},
        ping,
        snippet::{home, snippet_create, snippet_create_post, snippet_view},
        user::{
            user_login, user_login_post, user_logout_post, user_signup, user_signup_post,
        },
    },
    middleware::{authenticate, require_authentication},
    state::AppState,
};

/// Create the router for the web service
///
/// Everything except `/ping` runs inside a session; the `protected` routes
/// additionally require a logged-in user.
pub fn create_router<S>(state: AppState, sessions: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let protected = Router::new()
        .route(
            "/snippet/create",
            get(snippet_create).post(snippet_create_post),
        )
        .route("/user/logout", post(user_logout_post))
        .route("/account/view", get(account_view))
        .route(
            "/account/password/update",
            get(account_password_update).post(account_password_update_post),
        )
        .route_layer(middleware::from_fn(require_authentication));

    let dynamic = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/snippet/view/:id", get(snippet_view))
        .route("/user/signup", get(user_signup).post(user_signup_post))
        .route("/user/login", get(user_login).post(user_login_post))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(sessions);

    Router::new()
        .route("/ping", get(ping))
        .merge(dynamic)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com",
            ),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("deny"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("0"),
        ))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
