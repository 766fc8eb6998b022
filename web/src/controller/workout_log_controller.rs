use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::workout_log::{CreateParams, IndexParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{workout_log as WorkoutLogApi, workout_logs, Id};
use service::config::ApiVersion;

use log::*;

/// POST record a completed workout (students only; at most one log per
/// workout per day).
#[utoipa::path(
    post,
    path = "/workout_logs",
    params(ApiVersion),
    request_body = crate::params::workout_log::CreateParams,
    responses(
        (status = 201, description = "Successfully recorded the workout", body = domain::workout_logs::Model),
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
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST record workout log for workout {}", params.workout_id);

    let log_model = workout_logs::Model {
        id: Id::default(),
        tenant_id: Id::default(),
        student_id: Id::default(),
        workout_id: params.workout_id,
        logged_on: params.logged_on,
        duration_minutes: params.duration_minutes,
        perceived_effort: params.perceived_effort,
        comment: params.comment,
        created_at: chrono::Utc::now().into(),
    };

    let log = WorkoutLogApi::record(app_state.db_conn_ref(), &app_state.config, &user, log_model)
        .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), log)))
}

/// GET a student's workout logs, filterable by workout and date range.
#[utoipa::path(
    get,
    path = "/students/{student_id}/workout_logs",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student whose logs to list"),
        crate::params::workout_log::IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved the student's workout logs", body = [domain::workout_logs::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index_by_student(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(student_id): Path<Id>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET workout logs for student {student_id}, filter: {params:?}");

    let logs = WorkoutLogApi::find_for_student(
        app_state.db_conn_ref(),
        student_id,
        params.workout_id,
        params.from,
        params.until,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), logs)))
}
