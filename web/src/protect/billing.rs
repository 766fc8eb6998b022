use crate::protect::{Predicate, UserIsAdmin};
use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};

/// Billing is managed by tenant admins only.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn manage(
    State(app_state): State<AppState>,
    AuthenticatedUser(authenticated_user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks: Vec<Predicate> = vec![Predicate::new(UserIsAdmin, vec![])];

    crate::protect::authorize(&app_state, authenticated_user, request, next, checks).await
}
