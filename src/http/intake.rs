//! Public intake endpoints: the form itself, the submission handler, and the
//! confirmation page.

use axum::Router;
use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{self, NewRequest};

use super::pages;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(intake_form).post(submit))
        .route("/success", get(success))
}

#[derive(Debug, Default, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub occupancy: String,
    #[serde(default)]
    pub escrow_date: String,
    #[serde(default)]
    pub lockbox: String,
    #[serde(default)]
    pub meeting_someone: String,
    /// Checkbox: present in the form body when ticked, absent otherwise.
    pub text_consent: Option<String>,
}

async fn intake_form() -> Html<String> {
    Html(pages::intake_form())
}

async fn success() -> Html<String> {
    Html(pages::success_page())
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<IntakeForm>,
) -> Result<Redirect, ApiError> {
    let request = validate(form)?;

    // A single insert both persists and yields the stored record; once it
    // succeeds nothing else can turn this submission into an error.
    let record = store::insert(&state.database, request).await?;
    info!("Accepted inspection request {}", record.id);

    // Fire-and-forget: the redirect below never waits on delivery.
    state.notifier.notify(&record);

    Ok(Redirect::to("/success"))
}

/// Required-field presence is the only validation: name, phone, and address
/// must be non-empty after trimming. Everything else is optional, with empty
/// strings stored as absent.
fn validate(form: IntakeForm) -> Result<NewRequest, ApiError> {
    let name = required(&form.name, "name")?;
    let phone = required(&form.phone, "phone")?;
    let address = required(&form.address, "address")?;

    let escrow_date = match form.escrow_date.trim() {
        "" => None,
        raw => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ApiError::Validation("The escrow date must look like YYYY-MM-DD.".to_string())
            })?,
        ),
    };

    Ok(NewRequest {
        name,
        phone,
        address,
        occupancy: optional(&form.occupancy),
        escrow_date,
        lockbox: optional(&form.lockbox),
        meeting_someone: optional(&form.meeting_someone),
        text_consent: consent_value(form.text_consent.as_deref()),
    })
}

fn required(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!(
            "The {field} field is required."
        )));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// "Yes" iff the checkbox signal was present in the submission.
fn consent_value(signal: Option<&str>) -> String {
    if signal.is_some() { "Yes" } else { "No" }.to_string()
}
