use super::error::Error;
use chrono::Utc;
use entity::{
    invoices::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
};

pub async fn find_by_stripe_id(
    db: &impl ConnectionTrait,
    stripe_invoice_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::StripeInvoiceId.eq(stripe_invoice_id))
        .one(db)
        .await?)
}

pub async fn find_by_tenant(db: &impl ConnectionTrait, tenant_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .order_by_desc(Column::IssuedAt)
        .all(db)
        .await?)
}

/// Insert-or-reconcile keyed on the Stripe invoice id.
#[allow(clippy::too_many_arguments)]
pub async fn upsert_from_stripe(
    db: &impl ConnectionTrait,
    tenant_id: Id,
    stripe_invoice_id: &str,
    amount_due_cents: i64,
    amount_paid_cents: i64,
    currency: String,
    status: String,
    hosted_invoice_url: Option<String>,
    issued_at: DateTimeWithTimeZone,
) -> Result<Model, Error> {
    match find_by_stripe_id(db, stripe_invoice_id).await? {
        Some(existing) => {
            let active_model: ActiveModel = ActiveModel {
                id: Unchanged(existing.id),
                tenant_id: Unchanged(existing.tenant_id),
                stripe_invoice_id: Unchanged(existing.stripe_invoice_id),
                amount_due_cents: Set(amount_due_cents),
                amount_paid_cents: Set(amount_paid_cents),
                currency: Set(currency),
                status: Set(status),
                hosted_invoice_url: Set(hosted_invoice_url),
                issued_at: Unchanged(existing.issued_at),
                created_at: Unchanged(existing.created_at),
            };
            Ok(active_model.update(db).await?)
        }
        None => {
            let active_model: ActiveModel = ActiveModel {
                tenant_id: Set(tenant_id),
                stripe_invoice_id: Set(stripe_invoice_id.to_string()),
                amount_due_cents: Set(amount_due_cents),
                amount_paid_cents: Set(amount_paid_cents),
                currency: Set(currency),
                status: Set(status),
                hosted_invoice_url: Set(hosted_invoice_url),
                issued_at: Set(issued_at),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            };
            Ok(active_model.insert(db).await?)
        }
    }
}
