//! Snippet pages

use axum::{
    Extension, Form,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::info;

use super::{decode_form, render, template_data};
use crate::{
    error::{AppError, AppResult},
    forms::SnippetCreateForm,
    middleware::CurrentUser,
    models::ModelError,
    session::Flash,
    state::AppState,
    templates,
};

/// Latest snippets
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let snippets = state.snippets.latest().await?;

    let data = template_data(&session, &current).await?;
    Ok(render(StatusCode::OK, templates::home(&data, &snippets)))
}

pub async fn snippet_view(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id: i64 = match id.parse() {
        Ok(id) if id >= 1 => id,
        _ => return Err(AppError::NotFound),
    };

    let snippet = match state.snippets.get(id).await {
        Ok(snippet) => snippet,
        Err(ModelError::NoRecord) => return Err(AppError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let data = template_data(&session, &current).await?;
    Ok(render(StatusCode::OK, templates::view(&data, &snippet)))
}

pub async fn snippet_create(
    session: Session,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Response> {
    let data = template_data(&session, &current).await?;
    Ok(render(
        StatusCode::OK,
        templates::create(&data, &SnippetCreateForm::new()),
    ))
}

pub async fn snippet_create_post(
    State(state): State<AppState>,
    session: Session,
    Extension(current): Extension<CurrentUser>,
    form: Result<Form<SnippetCreateForm>, FormRejection>,
) -> AppResult<Response> {
    let mut form = decode_form(form)?;

    if !form.validate() {
        let data = template_data(&session, &current).await?;
        return Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            templates::create(&data, &form),
        ));
    }

    let id = state
        .snippets
        .insert(&form.title, &form.content, form.expires)
        .await?;
    info!("Snippet {} created by user {:?}", id, current.id);

    Flash::insert(&session, "Snippet successfully created!").await?;

    Ok(Redirect::to(&format!("/snippet/view/{}", id)).into_response())
}
