use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    subscription_status::SubscriptionStatus,
    subscriptions::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait,
};

use log::*;

pub async fn find_by_tenant(
    db: &impl ConnectionTrait,
    tenant_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .one(db)
        .await?)
}

pub async fn find_by_stripe_id(
    db: &impl ConnectionTrait,
    stripe_subscription_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::StripeSubscriptionId.eq(stripe_subscription_id))
        .one(db)
        .await?)
}

/// Inserts the subscription if it is unknown, otherwise reconciles the
/// mutable fields with what Stripe reported. Keyed on the Stripe
/// subscription id, so repeated webhook deliveries converge on one row.
pub async fn upsert_from_stripe(
    db: &impl ConnectionTrait,
    tenant_id: Id,
    stripe_subscription_id: &str,
    plan: String,
    status: SubscriptionStatus,
    current_period_end: Option<DateTimeWithTimeZone>,
    cancel_at_period_end: bool,
) -> Result<Model, Error> {
    let now = Utc::now();

    match find_by_stripe_id(db, stripe_subscription_id).await? {
        Some(existing) => {
            debug!(
                "Reconciling subscription {} to status {status}",
                existing.id
            );
            let active_model: ActiveModel = ActiveModel {
                id: Unchanged(existing.id),
                tenant_id: Unchanged(existing.tenant_id),
                stripe_subscription_id: Unchanged(existing.stripe_subscription_id),
                plan: Set(plan),
                status: Set(status),
                current_period_end: Set(current_period_end),
                cancel_at_period_end: Set(cancel_at_period_end),
                created_at: Unchanged(existing.created_at),
                updated_at: Set(now.into()),
            };
            Ok(active_model.update(db).await?)
        }
        None => {
            let active_model: ActiveModel = ActiveModel {
                tenant_id: Set(tenant_id),
                stripe_subscription_id: Set(stripe_subscription_id.to_string()),
                plan: Set(plan),
                status: Set(status),
                current_period_end: Set(current_period_end),
                cancel_at_period_end: Set(cancel_at_period_end),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            Ok(active_model.insert(db).await?)
        }
    }
}

pub async fn set_status(
    db: &impl ConnectionTrait,
    id: Id,
    status: SubscriptionStatus,
) -> Result<Model, Error> {
    let subscription = Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })?;

    let active_model = ActiveModel {
        id: Unchanged(subscription.id),
        status: Set(status),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}
