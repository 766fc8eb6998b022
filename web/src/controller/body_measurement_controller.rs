use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{body_measurement as BodyMeasurementApi, body_measurements, student as StudentApi, Id};
use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// GET a student's body measurements, newest first.
#[utoipa::path(
    get,
    path = "/students/{student_id}/measurements",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student whose measurements to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the student's measurements", body = [domain::body_measurements::Model]),
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
) -> Result<impl IntoResponse, Error> {
    debug!("GET measurements for student {student_id}");

    let measurements =
        BodyMeasurementApi::find_by_student(app_state.db_conn_ref(), student_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), measurements)))
}

/// POST record a body measurement for a student. Students may self-record.
#[utoipa::path(
    post,
    path = "/students/{student_id}/measurements",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student to record the measurement for"),
    ),
    request_body = domain::body_measurements::Model,
    responses(
        (status = 201, description = "Successfully recorded the measurement", body = domain::body_measurements::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(student_id): Path<Id>,
    Json(measurement_model): Json<body_measurements::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST record measurement for student {student_id}");

    let student = StudentApi::find_by_id(app_state.db_conn_ref(), student_id).await?;
    let measurement =
        BodyMeasurementApi::create(app_state.db_conn_ref(), &student, measurement_model).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        measurement,
    )))
}

/// PUT update a body measurement (staff only).
#[utoipa::path(
    put,
    path = "/students/{student_id}/measurements/{id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student the measurement belongs to"),
        ("id" = Id, Path, description = "Measurement id to update"),
    ),
    request_body = domain::body_measurements::Model,
    responses(
        (status = 200, description = "Successfully updated the measurement", body = domain::body_measurements::Model),
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
    Path((student_id, id)): Path<(Id, Id)>,
    Json(measurement_model): Json<body_measurements::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT update measurement {id} for student {student_id}");

    ensure_measurement_for_student(app_state.db_conn_ref(), student_id, id).await?;
    let measurement =
        BodyMeasurementApi::update(app_state.db_conn_ref(), id, measurement_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), measurement)))
}

/// DELETE a body measurement (staff only).
#[utoipa::path(
    delete,
    path = "/students/{student_id}/measurements/{id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student the measurement belongs to"),
        ("id" = Id, Path, description = "Measurement id to delete"),
    ),
    responses(
        (status = 200, description = "Successfully deleted the measurement"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Measurement not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path((student_id, id)): Path<(Id, Id)>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE measurement {id} for student {student_id}");

    ensure_measurement_for_student(app_state.db_conn_ref(), student_id, id).await?;
    BodyMeasurementApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(json!({"id": id})))
}

async fn ensure_measurement_for_student(
    db: &sea_orm::DatabaseConnection,
    student_id: Id,
    measurement_id: Id,
) -> Result<(), Error> {
    let measurement = BodyMeasurementApi::find_by_id(db, measurement_id).await?;
    if measurement.student_id != student_id {
        return Err(domain::error::Error::invalid(
            "measurement does not belong to this student",
        )
        .into());
    }
    Ok(())
}
