//! Account pages for the logged-in user

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
    forms::PasswordUpdateForm,
    middleware::CurrentUser,
    models::ModelError,
    session::{AuthenticatedUserId, Flash},
    state::AppState,
    templates,
};

pub async fn account_view(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let Some(user_id) = AuthenticatedUserId::get(&session).await? else {
        return Ok(Redirect::to("/user/login").into_response());
    };

    let user = match state.users.get(user_id).await {
        Ok(user) => user,
        Err(ModelError::NoRecord) => return Ok(Redirect::to("/user/login").into_response()),
        Err(e) => return Err(e.into()),
    };

    let data = template_data(&session, &current).await?;
    Ok(render(StatusCode::OK, templates::account(&data, &user)))
}

pub async fn account_password_update(
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::OK,
        templates::password(&data, &PasswordUpdateForm::default()),
    ))
}

pub async fn account_password_update_post(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
    form: Result<Form<PasswordUpdateForm>, FormRejection>,
) -> AppResult<Response> {
    let mut form = decode_form(form)?;

    if form.validate() {
        let Some(user_id) = AuthenticatedUserId::get(&session).await? else {
            return Ok(Redirect::to("/user/login").into_response());
        };

        match state
            .users
            .password_update(user_id, &form.current_password, &form.new_password)
            .await
        {
            Ok(()) => {
                info!("Password changed for user {}", user_id);
                Flash::insert(&session, "Your password has been updated successfully!").await?;
                return Ok(Redirect::to("/account/view").into_response());
            }
            Err(ModelError::InvalidCredentials) => form
                .validation
                .add_field_error("currentPassword", "Current password is incorrect"),
            Err(e) => return Err(e.into()),
        }
    }

    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::UNPROCESSABLE_ENTITY,
        templates::password(&data, &form),
    ))
}
