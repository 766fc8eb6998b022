use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    notification_kind::NotificationKind,
    notifications::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, sea_query::Expr, ActiveValue::Set, ActiveValue::Unchanged,
    ConnectionTrait, Order, QueryOrder,
};

pub async fn create(
    db: &impl ConnectionTrait,
    tenant_id: Id,
    user_id: Id,
    kind: NotificationKind,
    title: String,
    body: String,
) -> Result<Model, Error> {
    let notification_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(tenant_id),
        user_id: Set(user_id),
        kind: Set(kind),
        title: Set(title),
        body: Set(body),
        read_at: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(notification_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// The user's notifications, unread first, newest within each group.
pub async fn find_by_user(db: &impl ConnectionTrait, user_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by(Expr::col(Column::ReadAt).is_null(), Order::Desc)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn unread_count(db: &impl ConnectionTrait, user_id: Id) -> Result<u64, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ReadAt.is_null())
        .count(db)
        .await?)
}

pub async fn mark_read(db: &impl ConnectionTrait, id: Id, user_id: Id) -> Result<Model, Error> {
    let notification = find_by_id(db, id).await?;
    if notification.user_id != user_id {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        });
    }

    let active_model = ActiveModel {
        id: Unchanged(notification.id),
        read_at: Set(Some(Utc::now().into())),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}

pub async fn mark_all_read(db: &impl ConnectionTrait, user_id: Id) -> Result<u64, Error> {
    let result = Entity::update_many()
        .col_expr(
            Column::ReadAt,
            Expr::value(Some(DateTimeWithTimeZone::from(Utc::now()))),
        )
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ReadAt.is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
