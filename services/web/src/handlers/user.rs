//! Signup, login and logout

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::info;

use super::{decode_form, render, template_data};
use crate::{
    error::AppResult,
    forms::{UserLoginForm, UserSignupForm},
    middleware::CurrentUser,
    models::ModelError,
    session::{self, AuthenticatedUserId, Flash, TargetUrl},
    state::AppState,
    templates,
};

/// Where a fresh login lands when no page was requested before
const DEFAULT_LOGIN_REDIRECT: &str = "/snippet/create";

pub async fn user_signup(
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::OK,
        templates::signup(&data, &UserSignupForm::default()),
    ))
}

pub async fn user_signup_post(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
    form: Result<Form<UserSignupForm>, FormRejection>,
) -> AppResult<Response> {
    let mut form = decode_form(form)?;

    if form.validate() {
        match state
            .users
            .insert(&form.name, &form.email, &form.password)
            .await
        {
            Ok(()) => {
                info!("Signup for {}", form.email);
                Flash::insert(&session, "Your signup was successful. Please log in.").await?;
                return Ok(Redirect::to("/user/login").into_response());
            }
            Err(ModelError::DuplicateEmail) => form
                .validation
                .add_field_error("email", "Email address is already in use"),
            Err(e) => return Err(e.into()),
        }
    }

    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::UNPROCESSABLE_ENTITY,
        templates::signup(&data, &form),
    ))
}

pub async fn user_login(
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::OK,
        templates::login(&data, &UserLoginForm::default()),
    ))
}

pub async fn user_login_post(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
    form: Result<Form<UserLoginForm>, FormRejection>,
) -> AppResult<Response> {
    let mut form = decode_form(form)?;

    if form.validate() {
        info!("Login attempt for user: {}", form.email);

        match state.users.authenticate(&form.email, &form.password).await {
            Ok(id) => {
                session::renew(&session).await?;
                AuthenticatedUserId::insert(&session, id).await?;

                let target = TargetUrl::pop(&session)
                    .await?
                    .unwrap_or_else(|| DEFAULT_LOGIN_REDIRECT.to_string());
                return Ok(Redirect::to(&target).into_response());
            }
            Err(ModelError::InvalidCredentials) => form
                .validation
                .add_non_field_error("Email or password is incorrect"),
            Err(e) => return Err(e.into()),
        }
    }

    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::UNPROCESSABLE_ENTITY,
        templates::login(&data, &form),
    ))
}

pub async fn user_logout_post(
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    session::renew(&session).await?;
    AuthenticatedUserId::remove(&session).await?;
    info!("User {:?} logged out", current.id);

    Flash::insert(&session, "You've been logged out successfully!").await?;
    Ok(Redirect::to("/").into_response())
}
