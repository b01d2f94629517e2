//! Password-gated admin console: login/logout, the dashboard listing, the
//! per-record status/notes editor, and the CSV export. Every handler except
//! the login pair requires a valid privileged-session cookie and redirects
//! to the login prompt otherwise.

use axum::Router;
use axum::extract::{Form, Path, State};
use axum::http::HeaderMap;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::export;
use crate::state::AppState;
use crate::store;

use super::pages;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/", get(dashboard))
        .route("/request/{id}", get(view_request).post(edit_request))
        .route("/export.csv", get(export_csv))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct EditForm {
    #[serde(default)]
    status: String,
    #[serde(default)]
    admin_notes: String,
}

async fn login_form() -> Html<String> {
    Html(pages::login_page(false))
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if state.sessions.check_password(&form.password) {
        info!("Admin session granted");
        let cookie = state.sessions.login_cookie();
        (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/admin")).into_response()
    } else {
        info!("Admin login rejected");
        Html(pages::login_page(true)).into_response()
    }
}

async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = state.sessions.logout_cookie();
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to("/admin/login"),
    )
}

async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    state.sessions.require(&headers)?;
    let rows = store::list_all(&state.database).await?;
    Ok(Html(pages::dashboard(&rows)))
}

async fn view_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    state.sessions.require(&headers)?;
    let row = store::get(&state.database, id)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    Ok(Html(pages::request_detail(&row)))
}

/// Accepts any status string; transitions are deliberately unconstrained.
/// Last write wins when two admins edit the same record.
async fn edit_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, ApiError> {
    state.sessions.require(&headers)?;

    let notes = match form.admin_notes.trim() {
        "" => None,
        trimmed => Some(trimmed.to_string()),
    };
    store::update_status_and_notes(&state.database, id, form.status, notes).await?;
    info!("Request {id} updated by admin");

    Ok(Redirect::to(&format!("/admin/request/{id}")))
}

async fn export_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    state.sessions.require(&headers)?;
    let rows = store::list_all(&state.database).await?;
    let body = export::render_csv(&rows);
    Ok((
        AppendHeaders([
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::EXPORT_FILENAME),
            ),
        ]),
        body,
    )
        .into_response())
}
