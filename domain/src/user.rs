use crate::error::Error;
use crate::{audit, gateway::expo, users, Id};
use entity_api::{mutate, user};
use log::*;
use sea_orm::DatabaseConnection;
use sea_orm::IntoActiveModel;
use serde_json::json;

pub use entity_api::user::{
    create, find_by_email, find_by_id, find_by_tenant, find_by_tenant_and_role, AuthSession,
    Backend, Credentials, Role,
};

pub async fn update(
    db: &DatabaseConnection,
    user_id: Id,
    params: impl mutate::IntoUpdateMap,
) -> Result<users::Model, Error> {
    let existing_user = find_by_id(db, user_id).await?;
    let active_model = existing_user.into_active_model();
    Ok(mutate::update::<users::ActiveModel, users::Column>(
        db,
        active_model,
        params.into_update_map(),
    )
    .await?)
}

/// Changes the user's own password after verifying the current one.
pub async fn update_password(
    db: &DatabaseConnection,
    user_id: Id,
    current_password: &str,
    new_password: String,
) -> Result<(), Error> {
    let existing_user = find_by_id(db, user_id).await?;
    user::verify_password(current_password, &existing_user.password).await?;

    if new_password.len() < 8 {
        return Err(Error::invalid("password must be at least 8 characters"));
    }

    user::update_password(db, user_id, new_password).await?;

    audit::record_best_effort(
        db,
        existing_user.tenant_id,
        Some(user_id),
        "user.update_password",
        "user",
        Some(user_id),
        json!({}),
    )
    .await;

    Ok(())
}

/// Registers (or clears) the caller's Expo push token.
pub async fn register_push_token(
    db: &DatabaseConnection,
    user_id: Id,
    token: Option<String>,
) -> Result<users::Model, Error> {
    if let Some(token) = &token {
        if !expo::is_valid_push_token(token) {
            return Err(Error::invalid("not a valid Expo push token"));
        }
    }

    debug!("Registering push token for user {user_id}");
    Ok(user::set_expo_push_token(db, user_id, token).await?)
}

/// Creates a trainer account in the admin's tenant.
pub async fn create_trainer(
    db: &DatabaseConnection,
    actor: &users::Model,
    tenant_id: Id,
    mut user_model: users::Model,
) -> Result<users::Model, Error> {
    user_model.tenant_id = Some(tenant_id);
    user_model.role = Role::Trainer;
    let trainer = user::create(db, user_model).await?;

    audit::record_best_effort(
        db,
        Some(tenant_id),
        Some(actor.id),
        "user.create_trainer",
        "user",
        Some(trainer.id),
        json!({ "email": trainer.email }),
    )
    .await;

    Ok(trainer)
}

pub async fn delete(db: &DatabaseConnection, actor: &users::Model, user_id: Id) -> Result<(), Error> {
    let target = find_by_id(db, user_id).await?;
    user::delete(db, user_id).await?;

    audit::record_best_effort(
        db,
        target.tenant_id,
        Some(actor.id),
        "user.delete",
        "user",
        Some(user_id),
        json!({ "email": target.email }),
    )
    .await;

    Ok(())
}
