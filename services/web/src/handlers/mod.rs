//! Route handlers
//!
//! Form-submitting routes share one flow: decode, validate, call the model,
//! then either re-render the form with 422 or update the session and
//! redirect with 303.

pub mod account;
pub mod snippet;
pub mod user;

use axum::{
    Extension, Form,
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;
use tower_sessions::Session;

use crate::{
    error::{AppError, AppResult},
    middleware::CurrentUser,
    session::Flash,
    templates::{self, TemplateData},
};

/// Build the envelope for a page, consuming any pending flash message
pub(crate) async fn template_data(
    session: &Session,
    current: &CurrentUser,
) -> AppResult<TemplateData> {
    let flash = Flash::pop(session).await?;
    Ok(TemplateData::new(flash, current.is_authenticated()))
}

pub(crate) fn render(status: StatusCode, page: Markup) -> Response {
    (status, page).into_response()
}

/// Unwrap a decoded form, turning a malformed submission into a 400
pub(crate) fn decode_form<T>(form: Result<Form<T>, FormRejection>) -> AppResult<T> {
    form.map(|Form(inner)| inner)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Liveness probe
pub async fn ping() -> &'static str {
    "OK"
}

pub async fn about(
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let data = template_data(&session, &current).await?;
    Ok(render(StatusCode::OK, templates::about(&data)))
}
