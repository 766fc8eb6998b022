use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{
    physical_assessment as PhysicalAssessmentApi, physical_assessments, student as StudentApi, Id,
};
use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// GET a student's physical assessments, newest first.
#[utoipa::path(
    get,
    path = "/students/{student_id}/assessments",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student whose assessments to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the student's assessments", body = [domain::physical_assessments::Model]),
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
    debug!("GET assessments for student {student_id}");

    let assessments =
        PhysicalAssessmentApi::find_by_student(app_state.db_conn_ref(), student_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), assessments)))
}

/// POST record a physical assessment for a student (staff only).
#[utoipa::path(
    post,
    path = "/students/{student_id}/assessments",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student to record the assessment for"),
    ),
    request_body = domain::physical_assessments::Model,
    responses(
        (status = 201, description = "Successfully recorded the assessment", body = domain::physical_assessments::Model),
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
    Json(assessment_model): Json<physical_assessments::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST record assessment for student {student_id}");

    let student = StudentApi::find_by_id(app_state.db_conn_ref(), student_id).await?;
    let assessment =
        PhysicalAssessmentApi::create(app_state.db_conn_ref(), &student, assessment_model).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        assessment,
    )))
}

/// PUT update a physical assessment (staff only).
#[utoipa::path(
    put,
    path = "/students/{student_id}/assessments/{id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student the assessment belongs to"),
        ("id" = Id, Path, description = "Assessment id to update"),
    ),
    request_body = domain::physical_assessments::Model,
    responses(
        (status = 200, description = "Successfully updated the assessment", body = domain::physical_assessments::Model),
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
    Json(assessment_model): Json<physical_assessments::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT update assessment {id} for student {student_id}");

    ensure_assessment_for_student(app_state.db_conn_ref(), student_id, id).await?;
    let assessment =
        PhysicalAssessmentApi::update(app_state.db_conn_ref(), id, assessment_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), assessment)))
}

/// DELETE a physical assessment (staff only).
#[utoipa::path(
    delete,
    path = "/students/{student_id}/assessments/{id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student the assessment belongs to"),
        ("id" = Id, Path, description = "Assessment id to delete"),
    ),
    responses(
        (status = 200, description = "Successfully deleted the assessment"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Assessment not found")
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
    debug!("DELETE assessment {id} for student {student_id}");

    ensure_assessment_for_student(app_state.db_conn_ref(), student_id, id).await?;
    PhysicalAssessmentApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(json!({"id": id})))
}

async fn ensure_assessment_for_student(
    db: &sea_orm::DatabaseConnection,
    student_id: Id,
    assessment_id: Id,
) -> Result<(), Error> {
    let assessment = PhysicalAssessmentApi::find_by_id(db, assessment_id).await?;
    if assessment.student_id != student_id {
        return Err(domain::error::Error::invalid(
            "assessment does not belong to this student",
        )
        .into());
    }
    Ok(())
}
