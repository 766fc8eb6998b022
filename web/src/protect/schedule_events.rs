use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};

use domain::{roles::Role, Id};

/// Checks that the authenticated user is a party to the appointment: the
/// trainer who owns it, the student it is for, or a tenant admin.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn party(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(event_id): Path<Id>,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let event = match domain::schedule_event::find_by_id(app_state.db_conn_ref(), event_id).await {
        Ok(event) => event,
        Err(_) => {
            log::error!("Schedule event not found with ID {event_id:?}");
            return (StatusCode::NOT_FOUND, "NOT FOUND").into_response();
        }
    };

    let allowed = match user.role {
        Role::SuperAdmin => true,
        Role::Admin => user.tenant_id == Some(event.tenant_id),
        Role::Trainer => event.trainer_id == user.id,
        Role::Student => {
            match domain::student::find_by_id(app_state.db_conn_ref(), event.student_id).await {
                Ok(student) => student.user_id == user.id,
                Err(_) => false,
            }
        }
    };

    if allowed {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, "FORBIDDEN").into_response()
    }
}
