use super::error::Error;
use chrono::Utc;
use entity::{
    payments::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, QueryOrder};

pub async fn find_by_stripe_id(
    db: &impl ConnectionTrait,
    stripe_payment_intent_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::StripePaymentIntentId.eq(stripe_payment_intent_id))
        .one(db)
        .await?)
}

pub async fn find_by_tenant(db: &impl ConnectionTrait, tenant_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Records a payment once per Stripe payment intent; returns the existing
/// row on a repeat delivery.
pub async fn create_if_absent(
    db: &impl ConnectionTrait,
    payment_model: Model,
) -> Result<Model, Error> {
    if let Some(existing) = find_by_stripe_id(db, &payment_model.stripe_payment_intent_id).await? {
        return Ok(existing);
    }

    let payment_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(payment_model.tenant_id),
        invoice_id: Set(payment_model.invoice_id),
        stripe_payment_intent_id: Set(payment_model.stripe_payment_intent_id),
        amount_cents: Set(payment_model.amount_cents),
        currency: Set(payment_model.currency),
        status: Set(payment_model.status),
        paid_at: Set(payment_model.paid_at),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(payment_active_model.insert(db).await?)
}
