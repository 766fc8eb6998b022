use crate::{
    controller::health_check_controller,
    middleware::auth::{require_active_tenant, require_auth},
    params, protect, AppState,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};

use crate::controller::{
    activation_controller, audit_log_controller, billing_controller,
    body_measurement_controller, message_controller, notification_controller,
    physical_assessment_controller, schedule_event_controller, student_controller,
    tenant_controller, user_controller, user_session_controller, webhook_controller,
    workout_controller, workout_log_controller,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "FitCoach Platform API"
        ),
        paths(
            activation_controller::show,
            activation_controller::activate,
            audit_log_controller::index,
            billing_controller::checkout,
            billing_controller::overview,
            body_measurement_controller::index_by_student,
            body_measurement_controller::create,
            body_measurement_controller::update,
            body_measurement_controller::delete,
            health_check_controller::health_check,
            message_controller::create,
            message_controller::unread,
            message_controller::conversation,
            message_controller::mark_read,
            notification_controller::index,
            notification_controller::unread_count,
            notification_controller::mark_read,
            notification_controller::mark_all_read,
            physical_assessment_controller::index_by_student,
            physical_assessment_controller::create,
            physical_assessment_controller::update,
            physical_assessment_controller::delete,
            schedule_event_controller::index,
            schedule_event_controller::create,
            schedule_event_controller::read,
            schedule_event_controller::update,
            schedule_event_controller::update_status,
            student_controller::index,
            student_controller::create,
            student_controller::read,
            student_controller::update,
            student_controller::delete,
            student_controller::reassign,
            student_controller::reinvite,
            tenant_controller::index,
            tenant_controller::create,
            tenant_controller::read,
            tenant_controller::update,
            tenant_controller::delete,
            tenant_controller::suspend,
            tenant_controller::reactivate,
            tenant_controller::create_admin,
            tenant_controller::index_users,
            tenant_controller::summary,
            user_controller::update_profile,
            user_controller::update_password,
            user_controller::register_push_token,
            user_controller::index_trainers,
            user_controller::create_trainer,
            user_controller::delete_trainer,
            user_session_controller::login,
            user_session_controller::delete,
            webhook_controller::stripe_webhook,
            workout_controller::create,
            workout_controller::read,
            workout_controller::index_by_student,
            workout_controller::update,
            workout_controller::delete,
            workout_controller::create_exercise,
            workout_controller::update_exercise,
            workout_controller::delete_exercise,
            workout_controller::reorder_exercises,
            workout_log_controller::create,
            workout_log_controller::index_by_student,
        ),
        components(
            schemas(
                domain::audit_logs::Model,
                domain::body_measurements::Model,
                domain::exercises::Model,
                domain::invoices::Model,
                domain::messages::Model,
                domain::notifications::Model,
                domain::payments::Model,
                domain::physical_assessments::Model,
                domain::schedule_events::Model,
                domain::students::Model,
                domain::subscriptions::Model,
                domain::tenants::Model,
                domain::users::Model,
                domain::workout_logs::Model,
                domain::workouts::Model,
                domain::user::Credentials,
                params::student::InviteParams,
                params::student::UpdateParams,
                params::user::UpdateParams,
                params::workout::CreateParams,
                crate::response::student::StudentWithUser,
                crate::response::workout::WorkoutWithExercises,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "fitcoach_platform", description = "FitCoach multi-tenant fitness coaching API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our cookie session based authentication requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "id",
                    "Session id value returned from successful login via Set-Cookie header",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(session_routes())
        .merge(activation_routes(app_state.clone()))
        .merge(webhook_routes(app_state.clone()))
        .merge(user_routes(app_state.clone()))
        .merge(trainer_routes(app_state.clone()))
        .merge(student_routes(app_state.clone()))
        .merge(student_nested_routes(app_state.clone()))
        .merge(workout_routes(app_state.clone()))
        .merge(workout_log_routes(app_state.clone()))
        .merge(schedule_event_routes(app_state.clone()))
        .merge(message_routes(app_state.clone()))
        .merge(notification_routes(app_state.clone()))
        .merge(billing_routes(app_state.clone()))
        .merge(backoffice_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn session_routes() -> Router {
    Router::new()
        .route("/login", post(user_session_controller::login))
        // Logout stays reachable for suspended tenants.
        .merge(
            Router::new()
                .route("/logout", delete(user_session_controller::delete))
                .route_layer(from_fn(require_auth)),
        )
}

fn activation_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/activation/:token",
            get(activation_controller::show).post(activation_controller::activate),
        )
        .with_state(app_state)
}

fn webhook_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/webhooks/stripe", post(webhook_controller::stripe_webhook))
        .with_state(app_state)
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/users/me", put(user_controller::update_profile))
        .route("/users/me/password", put(user_controller::update_password))
        .route(
            "/users/me/push_token",
            put(user_controller::register_push_token),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn trainer_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/trainers",
            get(user_controller::index_trainers).post(user_controller::create_trainer),
        )
        .route("/trainers/:id", delete(user_controller::delete_trainer))
        .route_layer(from_fn(protect::admin_only))
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn student_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(
            Router::new()
                .route(
                    "/students",
                    get(student_controller::index).post(student_controller::create),
                )
                .route_layer(from_fn(protect::staff_only)),
        )
        .merge(
            Router::new()
                .route("/students/:student_id", get(student_controller::read))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::students::read,
                )),
        )
        .merge(
            Router::new()
                .route("/students/:student_id", put(student_controller::update))
                .route(
                    "/students/:student_id/reinvite",
                    post(student_controller::reinvite),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::students::manage,
                )),
        )
        .merge(
            Router::new()
                .route("/students/:student_id", delete(student_controller::delete))
                .route("/students/:student_id/trainer", put(student_controller::reassign))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::students::admin,
                )),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn student_nested_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(
            Router::new()
                .route(
                    "/students/:student_id/workouts",
                    get(workout_controller::index_by_student),
                )
                .route(
                    "/students/:student_id/workout_logs",
                    get(workout_log_controller::index_by_student),
                )
                .route(
                    "/students/:student_id/measurements",
                    get(body_measurement_controller::index_by_student)
                        .post(body_measurement_controller::create),
                )
                .route(
                    "/students/:student_id/assessments",
                    get(physical_assessment_controller::index_by_student),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::students::read_nested,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/students/:student_id/measurements/:id",
                    put(body_measurement_controller::update)
                        .delete(body_measurement_controller::delete),
                )
                .route(
                    "/students/:student_id/assessments",
                    post(physical_assessment_controller::create),
                )
                .route(
                    "/students/:student_id/assessments/:id",
                    put(physical_assessment_controller::update)
                        .delete(physical_assessment_controller::delete),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::students::manage_nested,
                )),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn workout_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(
            Router::new()
                .route("/workouts", post(workout_controller::create))
                .route_layer(from_fn(protect::staff_only)),
        )
        .merge(
            Router::new()
                .route("/workouts/:workout_id", get(workout_controller::read))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::workouts::read,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/workouts/:workout_id",
                    put(workout_controller::update).delete(workout_controller::delete),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::workouts::manage,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/workouts/:workout_id/exercises",
                    post(workout_controller::create_exercise),
                )
                .route(
                    "/workouts/:workout_id/exercises/order",
                    put(workout_controller::reorder_exercises),
                )
                .route(
                    "/workouts/:workout_id/exercises/:id",
                    put(workout_controller::update_exercise)
                        .delete(workout_controller::delete_exercise),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::workouts::manage_nested,
                )),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn workout_log_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/workout_logs", post(workout_log_controller::create))
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn schedule_event_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/schedule_events",
            get(schedule_event_controller::index),
        )
        .merge(
            Router::new()
                .route(
                    "/schedule_events",
                    post(schedule_event_controller::create),
                )
                .route_layer(from_fn(protect::staff_only)),
        )
        .merge(
            Router::new()
                .route(
                    "/schedule_events/:id",
                    get(schedule_event_controller::read),
                )
                .route(
                    "/schedule_events/:id/status",
                    put(schedule_event_controller::update_status),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::schedule_events::party,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/schedule_events/:id",
                    put(schedule_event_controller::update),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    protect::schedule_events::party,
                ))
                .route_layer(from_fn(protect::staff_only)),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn message_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/messages", post(message_controller::create))
        .route("/messages/unread", get(message_controller::unread))
        .route(
            "/messages/:counterpart_id",
            get(message_controller::conversation),
        )
        .route(
            "/messages/:counterpart_id/read",
            put(message_controller::mark_read),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn notification_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/notifications", get(notification_controller::index))
        .route(
            "/notifications/unread_count",
            get(notification_controller::unread_count),
        )
        .route(
            "/notifications/read_all",
            put(notification_controller::mark_all_read),
        )
        .route(
            "/notifications/:id/read",
            put(notification_controller::mark_read),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_active_tenant))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn billing_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/billing", get(billing_controller::overview))
        .route("/billing/checkout", post(billing_controller::checkout))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            protect::billing::manage,
        ))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}

fn backoffice_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/backoffice/tenants",
            get(tenant_controller::index).post(tenant_controller::create),
        )
        .route(
            "/backoffice/tenants/:id",
            get(tenant_controller::read)
                .put(tenant_controller::update)
                .delete(tenant_controller::delete),
        )
        .route(
            "/backoffice/tenants/:id/suspend",
            post(tenant_controller::suspend),
        )
        .route(
            "/backoffice/tenants/:id/reactivate",
            post(tenant_controller::reactivate),
        )
        .route(
            "/backoffice/tenants/:id/admins",
            post(tenant_controller::create_admin),
        )
        .route(
            "/backoffice/tenants/:id/users",
            get(tenant_controller::index_users),
        )
        .route("/backoffice/summary", get(tenant_controller::summary))
        .route("/backoffice/audit_logs", get(audit_log_controller::index))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            protect::tenants::backoffice,
        ))
        .route_layer(from_fn(require_auth))
        .with_state(app_state)
}
