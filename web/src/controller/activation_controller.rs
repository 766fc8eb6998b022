use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::student::ActivateParams;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::student as StudentApi;
use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// GET check an activation token and return the invitee for the
/// activation form. Unknown, used and expired tokens all answer 404.
#[utoipa::path(
    get,
    path = "/activation/{token}",
    params(
        ApiVersion,
        ("token" = String, Path, description = "Activation token from the invitation email")
    ),
    responses(
        (status = 200, description = "Token is valid; returns the invitee"),
        (status = 404, description = "Token is unknown, used or expired")
    )
)]
pub async fn show(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, Error> {
    trace!("GET activation token check");

    let invitee = StudentApi::activation_preview(app_state.db_conn_ref(), &token).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({
            "email": invitee.email,
            "first_name": invitee.first_name,
            "last_name": invitee.last_name,
        }),
    )))
}

/// POST complete account activation: sets the password, consumes the
/// token and activates the student.
#[utoipa::path(
    post,
    path = "/activation/{token}",
    params(
        ApiVersion,
        ("token" = String, Path, description = "Activation token from the invitation email")
    ),
    request_body = crate::params::student::ActivateParams,
    responses(
        (status = 200, description = "Account activated"),
        (status = 404, description = "Token is unknown, used or expired"),
        (status = 422, description = "Unprocessable Entity")
    )
)]
pub async fn activate(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    Json(params): Json<ActivateParams>,
) -> Result<impl IntoResponse, Error> {
    let user = StudentApi::activate(app_state.db_conn_ref(), &token, params.password).await?;
    info!("Activated student account {}", user.id);

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({ "email": user.email }),
    )))
}
