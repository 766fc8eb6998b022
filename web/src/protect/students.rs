use crate::protect::{Predicate, UserCanAccessStudent, UserIsAdmin, UserIsStaff};
use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::IntoResponse,
};

use domain::Id;

/// Any role may read a student record it can access (admins in-tenant,
/// trainers their assignees, students themselves).
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn read(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(student_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks: Vec<Predicate> = vec![Predicate::new(UserCanAccessStudent, vec![student_id])];

    crate::protect::authorize(&app_state, authenticated_user, request, next, checks).await
}

/// Staff-only writes against a specific student: the student must be
/// accessible and the caller must be a trainer or admin.
pub(crate) async fn manage(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(student_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks: Vec<Predicate> = vec![
        Predicate::new(UserIsStaff, vec![]),
        Predicate::new(UserCanAccessStudent, vec![student_id]),
    ];

    crate::protect::authorize(&app_state, authenticated_user, request, next, checks).await
}

/// Admin-only student operations (reassignment, archive).
pub(crate) async fn admin(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(student_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks: Vec<Predicate> = vec![
        Predicate::new(UserIsAdmin, vec![]),
        Predicate::new(UserCanAccessStudent, vec![student_id]),
    ];

    crate::protect::authorize(&app_state, authenticated_user, request, next, checks).await
}

/// Nested student resources (`/students/{student_id}/...`) whose paths
/// carry further ids; only the `student_id` segment names the student.
pub(crate) async fn read_nested(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(path_ids): Path<Vec<(String, String)>>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    nested(app_state, authenticated_user, path_ids, request, next, false).await
}

/// Staff-only writes against nested student resources.
pub(crate) async fn manage_nested(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    Path(path_ids): Path<Vec<(String, String)>>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    nested(app_state, authenticated_user, path_ids, request, next, true).await
}

async fn nested(
    app_state: AppState,
    authenticated_user: domain::users::Model,
    path_ids: Vec<(String, String)>,
    request: Request,
    next: Next,
    staff_only: bool,
) -> axum::response::Response {
    let student_id = path_ids
        .iter()
        .find(|(name, _)| name == "student_id")
        .and_then(|(_, value)| value.parse::<Id>().ok());

    match student_id {
        Some(student_id) => {
            let mut checks: Vec<Predicate> = Vec::new();
            if staff_only {
                checks.push(Predicate::new(UserIsStaff, vec![]));
            }
            checks.push(Predicate::new(UserCanAccessStudent, vec![student_id]));
            crate::protect::authorize(&app_state, authenticated_user, request, next, checks)
                .await
                .into_response()
        }
        None => (axum::http::StatusCode::BAD_REQUEST, "BAD REQUEST").into_response(),
    }
}
