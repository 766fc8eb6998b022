use crate::controller::user_controller::require_tenant;
use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::billing as BillingApi;
use service::config::ApiVersion;

use log::*;

/// POST start a subscription checkout for the tenant. Returns the Stripe
/// Checkout Session URL to redirect the admin to.
#[utoipa::path(
    post,
    path = "/billing/checkout",
    params(ApiVersion),
    responses(
        (status = 201, description = "Checkout session created"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Bad Gateway")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn checkout(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let tenant_id = require_tenant(&user)?;
    debug!("POST billing checkout for tenant {tenant_id}");

    let response =
        BillingApi::checkout(app_state.db_conn_ref(), &app_state.config, &user, tenant_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), response)))
}

/// GET the tenant's subscription and invoice history.
#[utoipa::path(
    get,
    path = "/billing",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved billing overview"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn overview(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let tenant_id = require_tenant(&user)?;

    let overview = BillingApi::overview(app_state.db_conn_ref(), tenant_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), overview)))
}
