use crate::protect::{Predicate, UserIsSuperAdmin};
use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};

/// The entire backoffice surface is super-admin only.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn backoffice(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks: Vec<Predicate> = vec![Predicate::new(UserIsSuperAdmin, vec![])];

    crate::protect::authorize(&app_state, authenticated_user, request, next, checks).await
}
