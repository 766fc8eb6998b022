use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{notification as NotificationApi, Id};
use serde_json::json;
use service::config::ApiVersion;

/// GET the caller's notifications, unread first.
#[utoipa::path(
    get,
    path = "/notifications",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved notifications", body = [domain::notifications::Model]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let notifications = NotificationApi::find_by_user(app_state.db_conn_ref(), user.id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        notifications,
    )))
}

/// GET the caller's unread notification count.
#[utoipa::path(
    get,
    path = "/notifications/unread_count",
    params(ApiVersion),
    responses(
        (status = 200, description = "Unread notification count"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn unread_count(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let count = NotificationApi::unread_count(app_state.db_conn_ref(), user.id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({ "unread": count }),
    )))
}

/// PUT mark one notification read. Only the recipient can do this.
#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Notification id to mark read"),
    ),
    responses(
        (status = 200, description = "Successfully marked read", body = domain::notifications::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn mark_read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    let notification = NotificationApi::mark_read(app_state.db_conn_ref(), id, user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), notification)))
}

/// PUT mark all of the caller's notifications read.
#[utoipa::path(
    put,
    path = "/notifications/read_all",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully marked all read"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn mark_all_read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let updated = NotificationApi::mark_all_read(app_state.db_conn_ref(), user.id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({ "updated": updated }),
    )))
}
