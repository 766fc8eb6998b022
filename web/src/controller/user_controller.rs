use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::user::{PushTokenParams, UpdateParams, UpdatePasswordParams};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{user as UserApi, users, Id};
use service::config::ApiVersion;

use log::*;

/// PUT update the authenticated user's own profile
#[utoipa::path(
    put,
    path = "/users/me",
    params(ApiVersion),
    request_body = crate::params::user::UpdateParams,
    responses(
        (status = 200, description = "Successfully updated the user profile", body = domain::users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_profile(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT update own profile for user: {}", user.id);

    let updated = UserApi::update(app_state.db_conn_ref(), user.id, params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), updated)))
}

/// PUT update the authenticated user's own password
#[utoipa::path(
    put,
    path = "/users/me/password",
    params(ApiVersion),
    request_body = crate::params::user::UpdatePasswordParams,
    responses(
        (status = 204, description = "Successfully updated the password"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_password(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<UpdatePasswordParams>,
) -> Result<impl IntoResponse, Error> {
    UserApi::update_password(
        app_state.db_conn_ref(),
        user.id,
        &params.current_password,
        params.new_password,
    )
    .await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}

/// PUT register or clear the authenticated user's Expo push token
#[utoipa::path(
    put,
    path = "/users/me/push_token",
    params(ApiVersion),
    request_body = crate::params::user::PushTokenParams,
    responses(
        (status = 200, description = "Successfully registered the push token", body = domain::users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn register_push_token(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<PushTokenParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT register push token for user: {}", user.id);

    let updated =
        UserApi::register_push_token(app_state.db_conn_ref(), user.id, params.expo_push_token)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), updated)))
}

/// INDEX the tenant's trainers (admin only)
#[utoipa::path(
    get,
    path = "/trainers",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all trainers", body = [domain::users::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index_trainers(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let tenant_id = require_tenant(&user)?;
    let trainers = UserApi::find_by_tenant_and_role(
        app_state.db_conn_ref(),
        tenant_id,
        UserApi::Role::Trainer,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), trainers)))
}

/// CREATE a trainer account in the tenant (admin only)
#[utoipa::path(
    post,
    path = "/trainers",
    params(ApiVersion),
    request_body = domain::users::Model,
    responses(
        (status = 201, description = "Trainer created successfully", body = domain::users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create_trainer(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(user_model): Json<users::Model>,
) -> Result<impl IntoResponse, Error> {
    let tenant_id = require_tenant(&user)?;
    let trainer =
        UserApi::create_trainer(app_state.db_conn_ref(), &user, tenant_id, user_model).await?;
    info!("Trainer created: {}", trainer.id);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), trainer)))
}

/// DELETE a trainer account in the tenant (admin only)
#[utoipa::path(
    delete,
    path = "/trainers/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "The ID of the trainer to delete")
    ),
    responses(
        (status = 204, description = "Trainer deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Trainer not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete_trainer(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(trainer_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    let tenant_id = require_tenant(&user)?;
    let target = UserApi::find_by_id(app_state.db_conn_ref(), trainer_id).await?;
    if target.tenant_id != Some(tenant_id) || target.role != UserApi::Role::Trainer {
        return Err(domain::error::Error::forbidden("not a trainer in this tenant").into());
    }

    info!("Deleting trainer: {trainer_id:?}");
    UserApi::delete(app_state.db_conn_ref(), &user, trainer_id).await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}

pub(crate) fn require_tenant(user: &users::Model) -> Result<Id, Error> {
    user.tenant_id
        .ok_or_else(|| domain::error::Error::forbidden("user is not bound to a tenant").into())
}
