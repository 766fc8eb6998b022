use crate::controller::user_controller::require_tenant;
use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::schedule_event::IndexParams;
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{
    roles::Role, schedule_event as ScheduleEventApi,
    schedule_event_status::ScheduleEventStatus, schedule_events, Id,
};
use serde::Deserialize;
use service::config::ApiVersion;
use utoipa::ToSchema;

use log::*;

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusParams {
    pub status: ScheduleEventStatus,
}

/// GET the tenant's schedule. Trainers see their own events, students
/// theirs; admins may filter freely.
#[utoipa::path(
    get,
    path = "/schedule_events",
    params(
        ApiVersion,
        crate::params::schedule_event::IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved Schedule Events", body = [domain::schedule_events::Model]),
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
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Schedule Events, filter: {params:?}");

    let tenant_id = require_tenant(&user)?;

    // Non-admins are pinned to their own events regardless of the filter.
    let (trainer_id, student_id) = match user.role {
        Role::Trainer => (Some(user.id), params.student_id),
        Role::Student => {
            let student =
                domain::student::find_by_user_id(app_state.db_conn_ref(), user.id).await?;
            (None, Some(student.id))
        }
        _ => (params.trainer_id, params.student_id),
    };

    let events = ScheduleEventApi::find_by_tenant(
        app_state.db_conn_ref(),
        tenant_id,
        trainer_id,
        student_id,
        params.from,
        params.until,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), events)))
}

/// POST create a new appointment with a student.
#[utoipa::path(
    post,
    path = "/schedule_events",
    params(ApiVersion),
    request_body = domain::schedule_events::Model,
    responses(
        (status = 201, description = "Successfully Created a New Schedule Event", body = domain::schedule_events::Model),
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
    Json(event_model): Json<schedule_events::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Schedule Event: {event_model:?}");

    let event =
        ScheduleEventApi::create(app_state.db_conn_ref(), &app_state.config, &user, event_model)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), event)))
}

/// GET a particular appointment.
#[utoipa::path(
    get,
    path = "/schedule_events/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Schedule event id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Schedule Event", body = domain::schedule_events::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Schedule event not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Schedule Event by id: {id}");

    let event = ScheduleEventApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), event)))
}

/// PUT update an appointment's details (staff only; terminal events are
/// immutable).
#[utoipa::path(
    put,
    path = "/schedule_events/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Id of schedule event to update"),
    ),
    request_body = domain::schedule_events::Model,
    responses(
        (status = 200, description = "Successfully Updated Schedule Event", body = domain::schedule_events::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(event_model): Json<schedule_events::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Schedule Event with id: {id}");

    let event = ScheduleEventApi::update(app_state.db_conn_ref(), id, event_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), event)))
}

/// PUT move an appointment to a new status. Students may confirm or
/// cancel their own appointments; completing is staff only.
#[utoipa::path(
    put,
    path = "/schedule_events/{id}/status",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Id of schedule event to transition"),
    ),
    request_body = StatusParams,
    responses(
        (status = 200, description = "Successfully transitioned the Schedule Event", body = domain::schedule_events::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_status(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<StatusParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Transition Schedule Event {id} to {:?}", params.status);

    if user.role == Role::Student && params.status == ScheduleEventStatus::Completed {
        return Err(domain::error::Error::forbidden(
            "students cannot complete appointments",
        )
        .into());
    }

    let event = ScheduleEventApi::transition(app_state.db_conn_ref(), id, params.status).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), event)))
}
