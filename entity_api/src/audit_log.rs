use super::error::Error;
use chrono::{NaiveDate, Utc};
use entity::{
    audit_logs::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, QueryOrder};

pub async fn create(db: &impl ConnectionTrait, log_model: Model) -> Result<Model, Error> {
    let log_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(log_model.tenant_id),
        user_id: Set(log_model.user_id),
        action: Set(log_model.action),
        entity_type: Set(log_model.entity_type),
        entity_id: Set(log_model.entity_id),
        detail: Set(log_model.detail),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(log_active_model.insert(db).await?)
}

pub async fn find_by(
    db: &impl ConnectionTrait,
    tenant_id: Option<Id>,
    action: Option<String>,
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find();

    if let Some(tenant_id) = tenant_id {
        query = query.filter(Column::TenantId.eq(tenant_id));
    }
    if let Some(action) = action {
        query = query.filter(Column::Action.eq(action));
    }
    if let Some(from) = from {
        query = query.filter(Column::CreatedAt.gte(from.and_time(chrono::NaiveTime::MIN).and_utc()));
    }
    if let Some(until) = until {
        let end_of_day = until.and_time(chrono::NaiveTime::MIN).and_utc() + chrono::Duration::days(1);
        query = query.filter(Column::CreatedAt.lt(end_of_day));
    }

    Ok(query.order_by_desc(Column::CreatedAt).all(db).await?)
}
