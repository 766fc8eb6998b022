use crate::protect::{Predicate, UserCanAccessStudent, UserIsStaff};
use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};

use domain::Id;

/// Resolves the workout in the path to its student, then applies the
/// standard student access rule. Writes additionally require staff.
async fn by_workout(
    app_state: AppState,
    authenticated_user: domain::users::Model,
    workout_id: Id,
    request: Request,
    next: Next,
    staff_only: bool,
) -> axum::response::Response {
    let workout = match domain::workout::find_by_id(app_state.db_conn_ref(), workout_id).await {
        Ok(workout) => workout,
        Err(_) => {
            log::error!("Workout not found with ID {workout_id:?}");
            return (StatusCode::NOT_FOUND, "NOT FOUND").into_response();
        }
    };

    let mut checks: Vec<Predicate> = Vec::new();
    if staff_only {
        checks.push(Predicate::new(UserIsStaff, vec![]));
    }
    checks.push(Predicate::new(UserCanAccessStudent, vec![workout.student_id]));

    crate::protect::authorize(&app_state, authenticated_user, request, next, checks)
        .await
        .into_response()
}

/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn read(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(workout_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    by_workout(app_state, authenticated_user, workout_id, request, next, false).await
}

pub(crate) async fn manage(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(workout_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    by_workout(app_state, authenticated_user, workout_id, request, next, true).await
}

/// Workout subresources (`/workouts/{workout_id}/exercises/...`).
pub(crate) async fn manage_nested(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(path_ids): Path<Vec<(String, String)>>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let workout_id = path_ids
        .iter()
        .find(|(name, _)| name == "workout_id")
        .and_then(|(_, value)| value.parse::<Id>().ok());

    match workout_id {
        Some(workout_id) => {
            by_workout(app_state, authenticated_user, workout_id, request, next, true).await
        }
        None => (StatusCode::BAD_REQUEST, "BAD REQUEST").into_response(),
    }
}
