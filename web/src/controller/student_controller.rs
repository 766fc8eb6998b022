use crate::controller::user_controller::require_tenant;
use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::student::{IndexParams, InviteParams, ReassignParams, UpdateParams};
use crate::response::student::StudentWithUser;
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{emails as EmailsApi, roles::Role, student as StudentApi, students, users, Id};
use service::config::ApiVersion;

use log::*;

/// INDEX the tenant's students. Admins see every student, trainers only
/// the ones assigned to them.
#[utoipa::path(
    get,
    path = "/students",
    params(
        ApiVersion,
        crate::params::student::IndexParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Students", body = [crate::response::student::StudentWithUser]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
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
    debug!("GET all Students, filter: {params:?}");

    let tenant_id = require_tenant(&user)?;
    // Trainers are pinned to their own roster regardless of the filter.
    let trainer_filter = match user.role {
        Role::Trainer => Some(user.id),
        _ => params.trainer_id,
    };

    let students = StudentApi::find_by_tenant(
        app_state.db_conn_ref(),
        tenant_id,
        trainer_filter,
        params.status.clone(),
        params.sort(),
    )
    .await?;

    let students: Vec<StudentWithUser> = students
        .into_iter()
        .map(|(student, user)| StudentWithUser::new(student, user))
        .collect();

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), students)))
}

/// CREATE (invite) a new Student: user account, student record and an
/// emailed activation link.
#[utoipa::path(
    post,
    path = "/students",
    params(ApiVersion),
    request_body = crate::params::student::InviteParams,
    responses(
        (status = 201, description = "Successfully invited a new Student", body = crate::response::student::StudentWithUser),
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
    Json(params): Json<InviteParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST invite a new Student: {}", params.email);

    let tenant_id = require_tenant(&user)?;
    // Trainers invite onto their own roster; admins may pick any trainer.
    let trainer_id = match user.role {
        Role::Trainer => Some(user.id),
        _ => params.trainer_id,
    };

    let user_model = users::Model {
        id: Id::default(),
        tenant_id: Some(tenant_id),
        email: params.email,
        first_name: params.first_name,
        last_name: params.last_name,
        display_name: None,
        password: String::new(),
        role: Role::Student,
        phone: None,
        avatar_url: None,
        timezone: "UTC".to_string(),
        expo_push_token: None,
        created_at: chrono::Utc::now().into(),
        updated_at: chrono::Utc::now().into(),
    };
    let student_model = students::Model {
        id: Id::default(),
        tenant_id,
        user_id: Id::default(),
        trainer_id,
        status: domain::student_status::StudentStatus::Pending,
        birth_date: params.birth_date,
        goal: params.goal,
        notes: params.notes,
        created_at: chrono::Utc::now().into(),
        updated_at: chrono::Utc::now().into(),
    };

    let (student, invited_user, token) =
        StudentApi::invite(app_state.db_conn_ref(), &user, tenant_id, user_model, student_model)
            .await?;

    // Best-effort activation email - log failures, don't block the invite
    if let Err(e) = EmailsApi::send_activation_email(&app_state.config, &invited_user, &token.token).await {
        warn!(
            "Failed to send activation email for user {}: {e:?}",
            invited_user.email
        );
    }

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        StudentWithUser::new(student, Some(invited_user)),
    )))
}

/// GET a particular Student specified by its id.
#[utoipa::path(
    get,
    path = "/students/{student_id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Student by its id", body = crate::response::student::StudentWithUser),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
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
    debug!("GET Student by id: {id}");

    let (student, student_user) = StudentApi::find_with_user(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        StudentWithUser::new(student, Some(student_user)),
    )))
}

/// PUT update a Student's profile fields.
#[utoipa::path(
    put,
    path = "/students/{student_id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Id of student to update"),
    ),
    request_body = crate::params::student::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Student", body = domain::students::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Student not found")
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
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Student with id: {id}");

    let student = StudentApi::update(app_state.db_conn_ref(), id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), student)))
}

/// DELETE (archive) a Student: sets their status to `inactive`, retaining
/// all data.
#[utoipa::path(
    delete,
    path = "/students/{student_id}",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student id to archive")
    ),
    responses(
        (status = 200, description = "Successfully archived the Student", body = domain::students::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE (archive) Student by id: {id}");

    let student = StudentApi::archive(app_state.db_conn_ref(), &user, id).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), student)))
}

/// PUT reassign a Student to a different trainer (admin only).
#[utoipa::path(
    put,
    path = "/students/{student_id}/trainer",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student id to reassign"),
    ),
    request_body = crate::params::student::ReassignParams,
    responses(
        (status = 200, description = "Successfully reassigned the Student", body = domain::students::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reassign(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<ReassignParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT reassign Student {id} to trainer {:?}", params.trainer_id);

    let student =
        StudentApi::reassign_trainer(app_state.db_conn_ref(), &user, id, params.trainer_id)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), student)))
}

/// POST re-send the activation invitation for a pending Student.
#[utoipa::path(
    post,
    path = "/students/{student_id}/reinvite",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student id to re-invite"),
    ),
    responses(
        (status = 204, description = "Successfully re-sent the invitation"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reinvite(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST re-invite Student {id}");

    let (invited_user, token) =
        StudentApi::reissue_activation(app_state.db_conn_ref(), &user, id).await?;

    if let Err(e) =
        EmailsApi::send_activation_email(&app_state.config, &invited_user, &token.token).await
    {
        warn!(
            "Failed to send activation email for user {}: {e:?}",
            invited_user.email
        );
    }

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
