use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::workout::{CreateParams, ReorderParams, UpdateParams};
use crate::response::workout::WorkoutWithExercises;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{exercises, roles::Role, workout as WorkoutApi, workouts, Id};
use service::config::ApiVersion;

use log::*;

/// POST create a new Workout with its exercises for a student.
#[utoipa::path(
    post,
    path = "/workouts",
    params(ApiVersion),
    request_body = crate::params::workout::CreateParams,
    responses(
        (status = 201, description = "Successfully Created a New Workout", body = crate::response::workout::WorkoutWithExercises),
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
    debug!("POST Create a New Workout: {}", params.name);

    let workout_model = workouts::Model {
        id: Id::default(),
        tenant_id: Id::default(),
        student_id: params.student_id,
        name: params.name,
        description: params.description,
        weekdays: serde_json::json!(params.weekdays),
        active: true,
        created_at: chrono::Utc::now().into(),
        updated_at: chrono::Utc::now().into(),
    };
    let exercise_models: Vec<exercises::Model> = params
        .exercises
        .into_iter()
        .map(|exercise| exercise.into_model())
        .collect();

    let (workout, exercise_rows) =
        WorkoutApi::create(app_state.db_conn_ref(), &user, workout_model, exercise_models).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        WorkoutWithExercises::new(workout, exercise_rows),
    )))
}

/// GET a particular Workout with its exercises.
#[utoipa::path(
    get,
    path = "/workouts/{workout_id}",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Workout id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Workout by its id", body = crate::response::workout::WorkoutWithExercises),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
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
    debug!("GET Workout by id: {id}");

    let (workout, exercise_rows) =
        WorkoutApi::find_with_exercises(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        WorkoutWithExercises::new(workout, exercise_rows),
    )))
}

/// GET a student's workouts. Students see only their active plans.
#[utoipa::path(
    get,
    path = "/students/{student_id}/workouts",
    params(
        ApiVersion,
        ("student_id" = Id, Path, description = "Student whose workouts to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the student's Workouts", body = [domain::workouts::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index_by_student(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(student_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Workouts for student: {student_id}");

    let only_active = user.role == Role::Student;
    let workout_rows =
        WorkoutApi::find_by_student(app_state.db_conn_ref(), student_id, only_active).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), workout_rows)))
}

/// PUT update a Workout's metadata.
#[utoipa::path(
    put,
    path = "/workouts/{workout_id}",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Id of workout to update"),
    ),
    request_body = crate::params::workout::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Workout", body = domain::workouts::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
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
    debug!("PUT Update Workout with id: {id}");

    if let Some(weekdays) = &params.weekdays {
        domain::workout::validate_weekdays(&serde_json::json!(weekdays))?;
    }
    let workout = WorkoutApi::update(app_state.db_conn_ref(), id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), workout)))
}

/// DELETE (deactivate) a Workout. The plan disappears from the student's
/// list but its logs are retained.
#[utoipa::path(
    delete,
    path = "/workouts/{workout_id}",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Workout id to deactivate")
    ),
    responses(
        (status = 200, description = "Successfully deactivated the Workout", body = domain::workouts::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE (deactivate) Workout by id: {id}");

    let workout = WorkoutApi::deactivate(app_state.db_conn_ref(), id).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), workout)))
}

/// POST add an exercise to a Workout (appended at the end).
#[utoipa::path(
    post,
    path = "/workouts/{workout_id}/exercises",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Workout to add the exercise to"),
    ),
    request_body = domain::exercises::Model,
    responses(
        (status = 201, description = "Successfully added the Exercise", body = domain::exercises::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create_exercise(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(workout_id): Path<Id>,
    Json(exercise_model): Json<exercises::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Add Exercise to Workout {workout_id}");

    let exercise =
        WorkoutApi::add_exercise(app_state.db_conn_ref(), workout_id, exercise_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), exercise)))
}

/// PUT update an exercise within a Workout.
#[utoipa::path(
    put,
    path = "/workouts/{workout_id}/exercises/{id}",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Workout the exercise belongs to"),
        ("id" = Id, Path, description = "Exercise id to update"),
    ),
    request_body = domain::exercises::Model,
    responses(
        (status = 200, description = "Successfully Updated the Exercise", body = domain::exercises::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_exercise(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path((workout_id, id)): Path<(Id, Id)>,
    Json(exercise_model): Json<exercises::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Exercise {id} in Workout {workout_id}");

    let exercise =
        WorkoutApi::update_exercise(app_state.db_conn_ref(), workout_id, id, exercise_model)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), exercise)))
}

/// DELETE an exercise from a Workout.
#[utoipa::path(
    delete,
    path = "/workouts/{workout_id}/exercises/{id}",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Workout the exercise belongs to"),
        ("id" = Id, Path, description = "Exercise id to delete"),
    ),
    responses(
        (status = 200, description = "Successfully deleted the Exercise"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete_exercise(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path((workout_id, id)): Path<(Id, Id)>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Exercise {id} from Workout {workout_id}");

    WorkoutApi::delete_exercise(app_state.db_conn_ref(), workout_id, id).await?;
    Ok(Json(serde_json::json!({"id": id})))
}

/// PUT reorder a Workout's exercises.
#[utoipa::path(
    put,
    path = "/workouts/{workout_id}/exercises/order",
    params(
        ApiVersion,
        ("workout_id" = Id, Path, description = "Workout whose exercises to reorder"),
    ),
    request_body = crate::params::workout::ReorderParams,
    responses(
        (status = 200, description = "Successfully reordered the Exercises", body = [domain::exercises::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reorder_exercises(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(workout_id): Path<Id>,
    Json(params): Json<ReorderParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Reorder Exercises in Workout {workout_id}");

    let exercise_rows =
        WorkoutApi::reorder_exercises(app_state.db_conn_ref(), workout_id, params.exercise_ids)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), exercise_rows)))
}
