use crate::error::Error;
use crate::{audit, tenant_status::TenantStatus, tenants::Model, users, Id};
use entity_api::{tenant, user};
use log::*;
use sea_orm::DatabaseConnection;
use serde_json::json;

pub use entity_api::tenant::{find_by_id, find_by_stripe_customer_id};

pub async fn create(
    db: &DatabaseConnection,
    actor_id: Id,
    tenant_model: Model,
) -> Result<Model, Error> {
    let tenant = tenant::create(db, tenant_model).await?;

    audit::record_best_effort(
        db,
        Some(tenant.id),
        Some(actor_id),
        "tenant.create",
        "tenant",
        Some(tenant.id),
        json!({ "name": tenant.name, "slug": tenant.slug }),
    )
    .await;

    Ok(tenant)
}

pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    Ok(tenant::update(db, id, model).await?)
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(tenant::find_all(db).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    Ok(tenant::delete_by_id(db, id).await?)
}

/// Suspends a tenant. `actor_id` is None when the suspension is driven by a
/// billing webhook rather than a super admin.
pub async fn suspend(
    db: &impl sea_orm::ConnectionTrait,
    id: Id,
    actor_id: Option<Id>,
    reason: &str,
) -> Result<Model, Error> {
    let tenant = tenant::set_status(db, id, TenantStatus::Suspended).await?;
    info!("Tenant {} suspended: {reason}", tenant.id);

    audit::record_best_effort(
        db,
        Some(tenant.id),
        actor_id,
        "tenant.suspend",
        "tenant",
        Some(tenant.id),
        json!({ "reason": reason }),
    )
    .await;

    Ok(tenant)
}

/// Reactivates a suspended tenant.
pub async fn reactivate(
    db: &impl sea_orm::ConnectionTrait,
    id: Id,
    actor_id: Option<Id>,
    reason: &str,
) -> Result<Model, Error> {
    let tenant = tenant::set_status(db, id, TenantStatus::Active).await?;
    info!("Tenant {} reactivated: {reason}", tenant.id);

    audit::record_best_effort(
        db,
        Some(tenant.id),
        actor_id,
        "tenant.reactivate",
        "tenant",
        Some(tenant.id),
        json!({ "reason": reason }),
    )
    .await;

    Ok(tenant)
}

/// Creates the initial admin account for a tenant (super admin backoffice).
pub async fn create_admin(
    db: &DatabaseConnection,
    actor_id: Id,
    tenant_id: Id,
    mut user_model: users::Model,
) -> Result<users::Model, Error> {
    // The tenant must exist before we hang an admin off of it.
    let tenant = tenant::find_by_id(db, tenant_id).await?;

    user_model.tenant_id = Some(tenant.id);
    user_model.role = user::Role::Admin;
    let admin = user::create(db, user_model).await?;

    audit::record_best_effort(
        db,
        Some(tenant.id),
        Some(actor_id),
        "tenant.create_admin",
        "user",
        Some(admin.id),
        json!({ "email": admin.email }),
    )
    .await;

    Ok(admin)
}

/// Platform-wide counts for the super admin dashboard.
#[derive(Debug, serde::Serialize)]
pub struct PlatformSummary {
    pub active_tenants: u64,
    pub suspended_tenants: u64,
}

pub async fn platform_summary(db: &DatabaseConnection) -> Result<PlatformSummary, Error> {
    let active_tenants = tenant::count_by_status(db, TenantStatus::Active).await?;
    let suspended_tenants = tenant::count_by_status(db, TenantStatus::Suspended).await?;

    Ok(PlatformSummary {
        active_tenants,
        suspended_tenants,
    })
}
