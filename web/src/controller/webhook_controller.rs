//! Controller for handling webhooks from external services.
//!
//! Handles Stripe webhooks for subscription and invoice lifecycle events.

use crate::{AppState, Error};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use domain::billing::{self as BillingApi, WebhookOutcome};
use log::*;
use serde::Serialize;

/// Response for webhook acknowledgment
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
}

/// POST /webhooks/stripe
///
/// Receives Stripe webhook deliveries. Authentication is by the
/// `Stripe-Signature` header rather than a session; processing is
/// idempotent per event id, so redeliveries are acknowledged without
/// being reapplied.
#[utoipa::path(
    post,
    path = "/webhooks/stripe",
    responses(
        (status = 200, description = "Event processed or acknowledged"),
        (status = 401, description = "Signature verification failed"),
        (status = 422, description = "Malformed event payload")
    )
)]
pub async fn stripe_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let signature_header = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let outcome = BillingApi::process_webhook(
        app_state.db_conn_ref(),
        &app_state.config,
        &body,
        signature_header,
    )
    .await?;

    let status = match outcome {
        WebhookOutcome::Processed => "processed",
        WebhookOutcome::AlreadyProcessed => "already_processed",
        WebhookOutcome::Ignored => "ignored",
    };
    debug!("Stripe webhook handled: {status}");

    Ok((
        StatusCode::OK,
        Json(WebhookResponse {
            status: status.to_string(),
        }),
    ))
}
