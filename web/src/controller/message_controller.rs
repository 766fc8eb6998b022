use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::message::{ConversationParams, SendParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{message as MessageApi, Id};
use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// POST send a chat message.
#[utoipa::path(
    post,
    path = "/messages",
    params(ApiVersion),
    request_body = crate::params::message::SendParams,
    responses(
        (status = 201, description = "Successfully sent the message", body = domain::messages::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<SendParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST send message to {}", params.recipient_id);

    let message = MessageApi::send(
        app_state.db_conn_ref(),
        &app_state.config,
        &user,
        params.recipient_id,
        params.body,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), message)))
}

/// GET unread message counts for the caller, grouped by counterpart.
#[utoipa::path(
    get,
    path = "/messages/unread",
    params(ApiVersion),
    responses(
        (status = 200, description = "Unread counts per counterpart"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn unread(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let total = MessageApi::unread_total(app_state.db_conn_ref(), &user).await?;
    let by_sender = MessageApi::unread_counts_by_sender(app_state.db_conn_ref(), &user).await?;

    let by_sender: Vec<serde_json::Value> = by_sender
        .into_iter()
        .map(|(sender_id, count)| json!({ "sender_id": sender_id, "count": count }))
        .collect();

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({ "total": total, "by_sender": by_sender }),
    )))
}

/// GET the conversation with one counterpart, newest first.
#[utoipa::path(
    get,
    path = "/messages/{counterpart_id}",
    params(
        ApiVersion,
        ("counterpart_id" = Id, Path, description = "The other user in the conversation"),
        crate::params::message::ConversationParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved the conversation", body = [domain::messages::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn conversation(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(counterpart_id): Path<Id>,
    Query(params): Query<ConversationParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET conversation with {counterpart_id}");

    let messages = MessageApi::conversation(
        app_state.db_conn_ref(),
        &user,
        counterpart_id,
        params.before,
        params.limit,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), messages)))
}

/// PUT mark the conversation with one counterpart as read.
#[utoipa::path(
    put,
    path = "/messages/{counterpart_id}/read",
    params(
        ApiVersion,
        ("counterpart_id" = Id, Path, description = "The other user in the conversation"),
    ),
    responses(
        (status = 200, description = "Marked the conversation read"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn mark_read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(counterpart_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    let updated =
        MessageApi::mark_conversation_read(app_state.db_conn_ref(), &user, counterpart_id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({ "updated": updated }),
    )))
}
