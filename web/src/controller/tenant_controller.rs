//! Super-admin backoffice: tenant lifecycle and platform overview.

use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{tenant as TenantApi, tenants, user as UserApi, users, Id};
use serde_json::json;
use service::config::ApiVersion;

use log::*;

/// INDEX all tenants.
#[utoipa::path(
    get,
    path = "/backoffice/tenants",
    params(ApiVersion),
    responses(
        (status = 200, description = "Successfully retrieved all Tenants", body = [domain::tenants::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Tenants");

    let tenants = TenantApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), tenants)))
}

/// POST create a new Tenant.
#[utoipa::path(
    post,
    path = "/backoffice/tenants",
    params(ApiVersion),
    request_body = domain::tenants::Model,
    responses(
        (status = 201, description = "Successfully Created a New Tenant", body = domain::tenants::Model),
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
    Json(tenant_model): Json<tenants::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Tenant from: {tenant_model:?}");

    let tenant = TenantApi::create(app_state.db_conn_ref(), user.id, tenant_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), tenant)))
}

/// GET a particular Tenant.
#[utoipa::path(
    get,
    path = "/backoffice/tenants/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Tenant id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Tenant by its id", body = domain::tenants::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
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
    debug!("GET Tenant by id: {id}");

    let tenant = TenantApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), tenant)))
}

/// PUT update a Tenant's name and logo.
#[utoipa::path(
    put,
    path = "/backoffice/tenants/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Id of tenant to update"),
    ),
    request_body = domain::tenants::Model,
    responses(
        (status = 200, description = "Successfully Updated Tenant", body = domain::tenants::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
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
    Json(tenant_model): Json<tenants::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Tenant with id: {id}");

    let tenant = TenantApi::update(app_state.db_conn_ref(), id, tenant_model).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), tenant)))
}

/// DELETE a Tenant and all of its data.
#[utoipa::path(
    delete,
    path = "/backoffice/tenants/{id}",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Tenant id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Tenant"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
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
    debug!("DELETE Tenant by id: {id}");

    TenantApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(json!({"id": id})))
}

/// POST suspend a Tenant.
#[utoipa::path(
    post,
    path = "/backoffice/tenants/{id}/suspend",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Tenant id to suspend"),
    ),
    responses(
        (status = 200, description = "Successfully suspended the Tenant", body = domain::tenants::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn suspend(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    info!("POST Suspend Tenant {id}");

    let tenant =
        TenantApi::suspend(app_state.db_conn_ref(), id, Some(user.id), "suspended by super admin")
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), tenant)))
}

/// POST reactivate a suspended Tenant.
#[utoipa::path(
    post,
    path = "/backoffice/tenants/{id}/reactivate",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Tenant id to reactivate"),
    ),
    responses(
        (status = 200, description = "Successfully reactivated the Tenant", body = domain::tenants::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reactivate(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    info!("POST Reactivate Tenant {id}");

    let tenant = TenantApi::reactivate(
        app_state.db_conn_ref(),
        id,
        Some(user.id),
        "reactivated by super admin",
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), tenant)))
}

/// POST create the initial admin account for a Tenant.
#[utoipa::path(
    post,
    path = "/backoffice/tenants/{id}/admins",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Tenant to create the admin for"),
    ),
    request_body = domain::users::Model,
    responses(
        (status = 201, description = "Admin created successfully", body = domain::users::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create_admin(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(user_model): Json<users::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create admin for Tenant {id}");

    let admin = TenantApi::create_admin(app_state.db_conn_ref(), user.id, id, user_model).await?;
    info!("Admin created for tenant {id}: {}", admin.id);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), admin)))
}

/// INDEX a Tenant's users.
#[utoipa::path(
    get,
    path = "/backoffice/tenants/{id}/users",
    params(
        ApiVersion,
        ("id" = Id, Path, description = "Tenant whose users to list")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the tenant's users", body = [domain::users::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn index_users(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    let users = UserApi::find_by_tenant(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), users)))
}

/// GET platform-wide tenant counts.
#[utoipa::path(
    get,
    path = "/backoffice/summary",
    params(ApiVersion),
    responses(
        (status = 200, description = "Platform summary"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn summary(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let summary = TenantApi::platform_summary(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), summary)))
}
