use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::audit_log::IndexParams;
use crate::{AppState, Error};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::audit as AuditApi;
use service::config::ApiVersion;

use log::*;

/// INDEX audit log entries, filterable by tenant, action and date range.
#[utoipa::path(
    get,
    path = "/backoffice/audit_logs",
    params(
        ApiVersion,
        crate::params::audit_log::IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved audit log entries", body = [domain::audit_logs::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET audit logs, filter: {params:?}");

    let entries = AuditApi::find_by(
        app_state.db_conn_ref(),
        params.tenant_id,
        params.action,
        params.from,
        params.until,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), entries)))
}
