//! This module provides protection mechanisms for various resources in the web application.
//!
//! It includes submodules for authorizing access to resources. Each submodule contains the necessary logic to protect
//! the corresponding resources, ensuring that only authorized users can access or modify them.
//!
//! The protection mechanisms are designed to be flexible and extensible, allowing for the addition
//! of new resources and protection strategies as needed. By organizing the protection logic into
//! separate submodules, we can maintain a clear and modular structure, making the codebase easier
//! to understand and maintain.

pub(crate) mod billing;
pub(crate) mod schedule_events;
pub(crate) mod students;
pub(crate) mod tenants;
pub(crate) mod workouts;

use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::AppState;
use axum::{
    async_trait,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use domain::{roles::Role, Id};

/// Trait representing a single authorization rule.
///
/// Implementors answer **"is the authenticated user allowed to proceed?"**.
/// The rule receives:
/// * shared application state (`AppState`)
/// * the authenticated [`domain::users::Model`]
/// * any additional [`Id`] parameters supplied by the caller.
#[async_trait]
pub trait Check: Send + Sync {
    async fn eval(&self, app: &AppState, user: &domain::users::Model, args: Vec<Id>) -> bool;
}

/// Pairs a [`Check`] implementation with the concrete arguments that the rule
/// should receive when evaluated.
///
/// Most callers will create predicates with the convenience constructor
/// [`Predicate::new`]:
/// ```rust,ignore
/// let checks = vec![
///     Predicate::new(UserCanAccessStudent, vec![student_id]),
///     Predicate::new(UserIsAdmin, vec![]),
/// ];
/// ```
/// The vector of predicates can then be passed to [`authorize`] middleware.
pub(crate) struct Predicate {
    predicate: Box<dyn Check>,
    args: Vec<Id>,
}

impl Predicate {
    pub(crate) fn new<C: Check + 'static>(predicate: C, args: Vec<Id>) -> Self {
        Self {
            predicate: Box::new(predicate),
            args,
        }
    }

    pub(crate) async fn check(&self, app_state: &AppState, user: &domain::users::Model) -> bool {
        self.predicate
            .eval(app_state, user, self.args.clone())
            .await
    }
}

/// Axum middleware that enforces one or more [`Predicate`]s.
///
/// Each predicate is evaluated in the order supplied; if any rule returns
/// `false` the request is aborted with **403 FORBIDDEN**.  When all rules
/// pass the wrapped handler (`next`) is executed.
pub(crate) async fn authorize(
    app_state: &AppState,
    authenticated_user: domain::users::Model,
    request: Request,
    next: Next,
    checks: Vec<Predicate>,
) -> impl IntoResponse {
    for check in checks {
        if !check.check(app_state, &authenticated_user).await {
            return (StatusCode::FORBIDDEN, "FORBIDDEN").into_response();
        }
    }
    next.run(request).await
}

pub struct UserIsSuperAdmin;

#[async_trait]
impl Check for UserIsSuperAdmin {
    async fn eval(
        &self,
        _app_state: &AppState,
        authenticated_user: &domain::users::Model,
        _args: Vec<Id>,
    ) -> bool {
        authenticated_user.role == Role::SuperAdmin
    }
}

pub struct UserIsAdmin;

#[async_trait]
impl Check for UserIsAdmin {
    async fn eval(
        &self,
        _app_state: &AppState,
        authenticated_user: &domain::users::Model,
        _args: Vec<Id>,
    ) -> bool {
        authenticated_user.role == Role::Admin
    }
}

pub struct UserIsStaff;

#[async_trait]
impl Check for UserIsStaff {
    async fn eval(
        &self,
        _app_state: &AppState,
        authenticated_user: &domain::users::Model,
        _args: Vec<Id>,
    ) -> bool {
        matches!(authenticated_user.role, Role::Admin | Role::Trainer)
    }
}

/// Resource-level rule: the student identified by `args[0]` must be
/// accessible to the user per [`domain::student::can_access`].
pub struct UserCanAccessStudent;

#[async_trait]
impl Check for UserCanAccessStudent {
    async fn eval(
        &self,
        app_state: &AppState,
        authenticated_user: &domain::users::Model,
        args: Vec<Id>,
    ) -> bool {
        let student_id = args[0];
        match domain::student::find_by_id(app_state.db_conn_ref(), student_id).await {
            Ok(student) => domain::student::can_access(authenticated_user, &student),
            Err(_) => {
                log::error!("Student not found with ID {student_id:?}");
                false
            }
        }
    }
}

/// Generic role gates usable directly as `route_layer(from_fn(...))`.
pub(crate) async fn staff_only(
    AuthenticatedUser(user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    if matches!(user.role, Role::Admin | Role::Trainer) {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, "FORBIDDEN").into_response()
    }
}

pub(crate) async fn admin_only(
    AuthenticatedUser(user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    if user.role == Role::Admin {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, "FORBIDDEN").into_response()
    }
}
