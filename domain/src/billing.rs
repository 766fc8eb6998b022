//! Stripe billing: checkout, customer resolution, and webhook-driven
//! subscription reconciliation.
//!
//! Webhook processing is idempotent per Stripe event id (see
//! `entity_api::webhook_event::claim`) and linear: no retries or queues,
//! Stripe redelivers on a non-2xx response.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::stripe::{StripeClient, StripeEvent, WebhookVerifier};
use crate::{
    audit, emails, invoices, notification, notification_kind::NotificationKind, payments,
    roles::Role, subscription_status::SubscriptionStatus, subscriptions, tenant,
    tenant_status::TenantStatus, tenants, users, Id,
};
use chrono::{DateTime, FixedOffset};
use entity_api::{invoice, payment, subscription, user, webhook_event};
use log::*;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use service::config::Config;

/// Result of handling one webhook delivery. All three outcomes are
/// acknowledged with a 2xx by the web layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    AlreadyProcessed,
    Ignored,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

#[derive(Debug, serde::Serialize)]
pub struct BillingOverview {
    pub subscription: Option<subscriptions::Model>,
    pub invoices: Vec<invoices::Model>,
    pub payments: Vec<payments::Model>,
}

/// Starts a subscription checkout for the tenant.
///
/// Customer resolution is idempotent: an existing `stripe_customer_id` on
/// the tenant is reused, otherwise the customer is created once and
/// persisted before the checkout session is requested.
pub async fn checkout(
    db: &DatabaseConnection,
    config: &Config,
    actor: &users::Model,
    tenant_id: Id,
) -> Result<CheckoutResponse, Error> {
    let tenant = tenant::find_by_id(db, tenant_id).await?;
    let price_id = config.stripe_price_id().ok_or_else(|| config_error("Stripe price id"))?;
    let frontend_base_url = config
        .frontend_base_url()
        .ok_or_else(|| config_error("frontend base URL"))?;

    let client = StripeClient::new(config)?;

    let customer_id = match &tenant.stripe_customer_id {
        Some(customer_id) => customer_id.clone(),
        None => {
            let customer = client
                .create_customer(&tenant.name, &actor.email, &tenant.id.to_string())
                .await?;
            entity_api::tenant::set_stripe_customer_id(db, tenant.id, &customer.id).await?;
            info!("Tenant {} resolved to Stripe customer {}", tenant.id, customer.id);
            customer.id
        }
    };

    let session = client
        .create_checkout_session(
            &customer_id,
            &price_id,
            &format!("{frontend_base_url}/billing/success"),
            &format!("{frontend_base_url}/billing/cancelled"),
        )
        .await?;

    let checkout_url = session.url.ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
            "Stripe returned a checkout session without a URL".to_string(),
        )),
    })?;

    audit::record_best_effort(
        db,
        Some(tenant.id),
        Some(actor.id),
        "billing.checkout",
        "tenant",
        Some(tenant.id),
        json!({ "session_id": session.id }),
    )
    .await;

    Ok(CheckoutResponse { checkout_url })
}

/// The tenant's current subscription plus invoice and payment history.
pub async fn overview(db: &DatabaseConnection, tenant_id: Id) -> Result<BillingOverview, Error> {
    let subscription = subscription::find_by_tenant(db, tenant_id).await?;
    let invoices = invoice::find_by_tenant(db, tenant_id).await?;
    let payments = payment::find_by_tenant(db, tenant_id).await?;

    Ok(BillingOverview {
        subscription,
        invoices,
        payments,
    })
}

/// Verifies and processes one webhook delivery.
pub async fn process_webhook(
    db: &DatabaseConnection,
    config: &Config,
    payload: &[u8],
    signature_header: &str,
) -> Result<WebhookOutcome, Error> {
    let secret = config
        .stripe_webhook_secret()
        .ok_or_else(|| config_error("Stripe webhook secret"))?;

    let event = WebhookVerifier::new(secret).verify_and_parse(payload, signature_header)?;
    debug!("Verified Stripe webhook {} ({})", event.id, event.event_type);

    // Claim before processing: the unique event id ledger makes concurrent
    // and repeated deliveries converge on a single processing pass.
    match webhook_event::claim(db, &event.id, &event.event_type).await? {
        webhook_event::ClaimResult::AlreadyProcessed => return Ok(WebhookOutcome::AlreadyProcessed),
        webhook_event::ClaimResult::Claimed => {}
    }

    dispatch(db, config, &event).await
}

async fn dispatch(
    db: &DatabaseConnection,
    config: &Config,
    event: &StripeEvent,
) -> Result<WebhookOutcome, Error> {
    let object = &event.data.object;
    match event.event_type.as_str() {
        "checkout.session.completed" => handle_checkout_completed(db, config, object).await,
        "customer.subscription.created" | "customer.subscription.updated" => {
            handle_subscription_updated(db, config, object).await
        }
        "customer.subscription.deleted" => handle_subscription_deleted(db, config, object).await,
        "invoice.paid" | "invoice.payment_succeeded" => {
            handle_invoice_paid(db, object).await
        }
        "invoice.payment_failed" => handle_invoice_payment_failed(db, config, object).await,
        other => {
            info!("Acknowledging unhandled Stripe event type: {other}");
            Ok(WebhookOutcome::Ignored)
        }
    }
}

/// Links the subscription created by a completed Checkout Session to the
/// tenant. Full status details arrive via `customer.subscription.*`.
async fn handle_checkout_completed(
    db: &DatabaseConnection,
    config: &Config,
    object: &Value,
) -> Result<WebhookOutcome, Error> {
    let tenant = match tenant_for_customer(db, object).await? {
        Some(tenant) => tenant,
        None => return Ok(WebhookOutcome::Ignored),
    };

    if let Some(subscription_id) = str_field(object, "subscription") {
        let plan = config.stripe_price_id().unwrap_or_else(|| "unknown".to_string());
        let existing = subscription::find_by_stripe_id(db, subscription_id).await?;
        if existing.is_none() {
            subscription::upsert_from_stripe(
                db,
                tenant.id,
                subscription_id,
                plan,
                SubscriptionStatus::Incomplete,
                None,
                false,
            )
            .await?;
        }
    }

    audit::record_best_effort(
        db,
        Some(tenant.id),
        None,
        "billing.checkout_completed",
        "tenant",
        Some(tenant.id),
        json!({ "subscription": str_field(object, "subscription") }),
    )
    .await;

    Ok(WebhookOutcome::Processed)
}

/// Reconciles the local subscription row with Stripe's state. A
/// subscription that entitles access reactivates a suspended tenant; a
/// past-due one alerts the tenant's admins.
async fn handle_subscription_updated(
    db: &DatabaseConnection,
    config: &Config,
    object: &Value,
) -> Result<WebhookOutcome, Error> {
    let tenant = match tenant_for_customer(db, object).await? {
        Some(tenant) => tenant,
        None => return Ok(WebhookOutcome::Ignored),
    };

    let subscription_id = require_str_field(object, "id")?;
    let status = SubscriptionStatus::from_stripe(str_field(object, "status").unwrap_or_default());
    let plan = plan_from_subscription(object)
        .unwrap_or_else(|| config.stripe_price_id().unwrap_or_else(|| "unknown".to_string()));
    let current_period_end = timestamp_field(object, "current_period_end");
    let cancel_at_period_end = object
        .get("cancel_at_period_end")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    subscription::upsert_from_stripe(
        db,
        tenant.id,
        subscription_id,
        plan,
        status.clone(),
        current_period_end,
        cancel_at_period_end,
    )
    .await?;

    if status.entitles_access() && tenant.status == TenantStatus::Suspended {
        tenant::reactivate(db, tenant.id, None, "subscription active again").await?;
        notify_tenant_admins(
            db,
            config,
            &tenant,
            "Subscription reactivated",
            "Your FitCoach subscription is active again.",
        )
        .await;
    } else if status == SubscriptionStatus::PastDue {
        notify_tenant_admins(
            db,
            config,
            &tenant,
            "Payment overdue",
            "Your latest subscription payment is overdue.",
        )
        .await;
    }

    Ok(WebhookOutcome::Processed)
}

/// Marks the subscription canceled and suspends the tenant.
async fn handle_subscription_deleted(
    db: &DatabaseConnection,
    config: &Config,
    object: &Value,
) -> Result<WebhookOutcome, Error> {
    let tenant = match tenant_for_customer(db, object).await? {
        Some(tenant) => tenant,
        None => return Ok(WebhookOutcome::Ignored),
    };

    let subscription_id = require_str_field(object, "id")?;
    if let Some(existing) = subscription::find_by_stripe_id(db, subscription_id).await? {
        subscription::set_status(db, existing.id, SubscriptionStatus::Canceled).await?;
    }

    if tenant.status != TenantStatus::Suspended {
        tenant::suspend(db, tenant.id, None, "subscription cancelled").await?;
    }

    notify_tenant_admins(
        db,
        config,
        &tenant,
        "Subscription cancelled",
        "Your FitCoach subscription has been cancelled and the account suspended.",
    )
    .await;

    Ok(WebhookOutcome::Processed)
}

/// Upserts the invoice and records its payment.
async fn handle_invoice_paid(
    db: &DatabaseConnection,
    object: &Value,
) -> Result<WebhookOutcome, Error> {
    let tenant = match tenant_for_customer(db, object).await? {
        Some(tenant) => tenant,
        None => return Ok(WebhookOutcome::Ignored),
    };

    let invoice_model = upsert_invoice(db, &tenant, object).await?;

    if let Some(payment_intent_id) = str_field(object, "payment_intent") {
        payment::create_if_absent(
            db,
            payments::Model {
                id: Id::default(),
                tenant_id: tenant.id,
                invoice_id: Some(invoice_model.id),
                stripe_payment_intent_id: payment_intent_id.to_string(),
                amount_cents: int_field(object, "amount_paid").unwrap_or(0),
                currency: str_field(object, "currency").unwrap_or("usd").to_string(),
                status: "succeeded".to_string(),
                paid_at: Some(chrono::Utc::now().into()),
                created_at: chrono::Utc::now().into(),
            },
        )
        .await?;
    }

    Ok(WebhookOutcome::Processed)
}

/// Upserts the failed invoice, marks the subscription past due and alerts
/// the tenant's admins.
async fn handle_invoice_payment_failed(
    db: &DatabaseConnection,
    config: &Config,
    object: &Value,
) -> Result<WebhookOutcome, Error> {
    let tenant = match tenant_for_customer(db, object).await? {
        Some(tenant) => tenant,
        None => return Ok(WebhookOutcome::Ignored),
    };

    upsert_invoice(db, &tenant, object).await?;

    if let Some(subscription_id) = str_field(object, "subscription") {
        if let Some(existing) = subscription::find_by_stripe_id(db, subscription_id).await? {
            subscription::set_status(db, existing.id, SubscriptionStatus::PastDue).await?;
        }
    }

    let admins = user::find_by_tenant_and_role(db, tenant.id, Role::Admin).await?;
    for admin in &admins {
        notification::notify(
            db,
            config,
            tenant.id,
            admin,
            NotificationKind::Billing,
            "Payment failed",
            "The latest subscription payment failed. Please update your payment method.",
        )
        .await;
        if let Err(e) = emails::send_payment_failed_email(config, admin, &tenant.name).await {
            warn!("Failed to send payment-failed email to {}: {e:?}", admin.email);
        }
    }

    audit::record_best_effort(
        db,
        Some(tenant.id),
        None,
        "billing.payment_failed",
        "invoice",
        None,
        json!({ "stripe_invoice_id": str_field(object, "id") }),
    )
    .await;

    Ok(WebhookOutcome::Processed)
}

async fn upsert_invoice(
    db: &DatabaseConnection,
    tenant: &tenants::Model,
    object: &Value,
) -> Result<invoices::Model, Error> {
    let stripe_invoice_id = require_str_field(object, "id")?;
    let issued_at =
        timestamp_field(object, "created").unwrap_or_else(|| chrono::Utc::now().into());

    Ok(invoice::upsert_from_stripe(
        db,
        tenant.id,
        stripe_invoice_id,
        int_field(object, "amount_due").unwrap_or(0),
        int_field(object, "amount_paid").unwrap_or(0),
        str_field(object, "currency").unwrap_or("usd").to_string(),
        str_field(object, "status").unwrap_or("open").to_string(),
        str_field(object, "hosted_invoice_url").map(str::to_string),
        issued_at,
    )
    .await?)
}

/// Resolves the tenant behind the event object's `customer` field. Events
/// for customers the platform does not know are acknowledged and skipped.
async fn tenant_for_customer(
    db: &DatabaseConnection,
    object: &Value,
) -> Result<Option<tenants::Model>, Error> {
    let customer_id = match str_field(object, "customer") {
        Some(customer_id) => customer_id,
        None => {
            warn!("Stripe event object carries no customer id");
            return Ok(None);
        }
    };

    let tenant = tenant::find_by_stripe_customer_id(db, customer_id).await?;
    if tenant.is_none() {
        warn!("No tenant found for Stripe customer {customer_id}");
    }
    Ok(tenant)
}

async fn notify_tenant_admins(
    db: &DatabaseConnection,
    config: &Config,
    tenant: &tenants::Model,
    title: &str,
    body: &str,
) {
    let admins = match user::find_by_tenant_and_role(db, tenant.id, Role::Admin).await {
        Ok(admins) => admins,
        Err(e) => {
            warn!("Failed to load admins for tenant {}: {e:?}", tenant.id);
            return;
        }
    };

    for admin in &admins {
        notification::notify(
            db,
            config,
            tenant.id,
            admin,
            NotificationKind::Billing,
            title,
            body,
        )
        .await;
    }
}

fn config_error(what: &str) -> Error {
    error!("{what} not configured");
    Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    }
}

fn str_field<'a>(object: &'a Value, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn require_str_field<'a>(object: &'a Value, key: &str) -> Result<&'a str, Error> {
    str_field(object, key)
        .ok_or_else(|| Error::invalid(format!("Stripe event object missing `{key}`")))
}

fn int_field(object: &Value, key: &str) -> Option<i64> {
    object.get(key).and_then(Value::as_i64)
}

fn timestamp_field(object: &Value, key: &str) -> Option<DateTime<FixedOffset>> {
    let ts = int_field(object, key)?;
    DateTime::from_timestamp(ts, 0).map(Into::into)
}

fn plan_from_subscription(object: &Value) -> Option<String> {
    object
        .get("items")?
        .get("data")?
        .get(0)?
        .get("price")?
        .get("id")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subscription_object() -> Value {
        json!({
            "id": "sub_123",
            "customer": "cus_456",
            "status": "active",
            "cancel_at_period_end": true,
            "current_period_end": 1760000000,
            "items": {
                "data": [
                    { "price": { "id": "price_789" } }
                ]
            }
        })
    }

    #[test]
    fn str_and_int_fields_extract_from_event_objects() {
        let object = subscription_object();
        assert_eq!(str_field(&object, "id"), Some("sub_123"));
        assert_eq!(str_field(&object, "customer"), Some("cus_456"));
        assert_eq!(str_field(&object, "missing"), None);
        assert_eq!(int_field(&object, "current_period_end"), Some(1760000000));
    }

    #[test]
    fn require_str_field_errors_on_missing_keys() {
        let object = subscription_object();
        assert!(require_str_field(&object, "id").is_ok());
        assert!(require_str_field(&object, "nope").is_err());
    }

    #[test]
    fn plan_is_read_from_the_first_line_item_price() {
        let object = subscription_object();
        assert_eq!(
            plan_from_subscription(&object),
            Some("price_789".to_string())
        );
        assert_eq!(plan_from_subscription(&json!({})), None);
    }

    #[test]
    fn timestamp_field_converts_unix_seconds() {
        let object = subscription_object();
        let period_end = timestamp_field(&object, "current_period_end").unwrap();
        assert_eq!(period_end.timestamp(), 1760000000);
        assert_eq!(timestamp_field(&object, "missing"), None);
    }
}
