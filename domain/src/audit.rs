use crate::{audit_logs, error::Error, Id};
use chrono::NaiveDate;
use entity_api::audit_log;
use log::*;
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Writes an audit log entry. `tenant_id` is None for platform-level
/// actions, `user_id` is None for webhook-driven changes.
pub async fn record(
    db: &impl ConnectionTrait,
    tenant_id: Option<Id>,
    user_id: Option<Id>,
    action: &str,
    entity_type: &str,
    entity_id: Option<Id>,
    detail: serde_json::Value,
) -> Result<audit_logs::Model, Error> {
    let model = audit_logs::Model {
        id: Id::default(),
        tenant_id,
        user_id,
        action: action.to_string(),
        entity_type: entity_type.to_string(),
        entity_id,
        detail,
        created_at: chrono::Utc::now().into(),
    };

    Ok(audit_log::create(db, model).await?)
}

/// Same as [`record`] but never fails the surrounding operation: a failed
/// audit write is logged and swallowed.
pub async fn record_best_effort(
    db: &impl ConnectionTrait,
    tenant_id: Option<Id>,
    user_id: Option<Id>,
    action: &str,
    entity_type: &str,
    entity_id: Option<Id>,
    detail: serde_json::Value,
) {
    if let Err(e) = record(db, tenant_id, user_id, action, entity_type, entity_id, detail).await {
        warn!("Failed to write audit log entry for {action}: {e:?}");
    }
}

pub async fn find_by(
    db: &DatabaseConnection,
    tenant_id: Option<Id>,
    action: Option<String>,
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<Vec<audit_logs::Model>, Error> {
    Ok(audit_log::find_by(db, tenant_id, action, from, until).await?)
}
