use super::error::Error;
use chrono::Utc;
use entity::{
    messages::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, sea_query::Expr, ActiveValue::Set, Condition, ConnectionTrait,
    QueryOrder, QuerySelect,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, message_model: Model) -> Result<Model, Error> {
    debug!(
        "New Message from {} to {}",
        message_model.sender_id, message_model.recipient_id
    );

    let message_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(message_model.tenant_id),
        sender_id: Set(message_model.sender_id),
        recipient_id: Set(message_model.recipient_id),
        body: Set(message_model.body),
        read_at: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(message_active_model.insert(db).await?)
}

/// Both directions of the conversation between two users, newest first.
/// `before` excludes messages created at or after the given instant, which
/// is how clients page backwards through history.
pub async fn conversation(
    db: &impl ConnectionTrait,
    user_id: Id,
    counterpart_id: Id,
    before: Option<DateTimeWithTimeZone>,
    limit: u64,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find().filter(
        Condition::any()
            .add(
                Condition::all()
                    .add(Column::SenderId.eq(user_id))
                    .add(Column::RecipientId.eq(counterpart_id)),
            )
            .add(
                Condition::all()
                    .add(Column::SenderId.eq(counterpart_id))
                    .add(Column::RecipientId.eq(user_id)),
            ),
    );

    if let Some(before) = before {
        query = query.filter(Column::CreatedAt.lt(before));
    }

    Ok(query
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?)
}

/// Marks every unread message sent *to* `recipient_id` *by* `counterpart_id`
/// as read. Returns how many rows changed.
pub async fn mark_conversation_read(
    db: &impl ConnectionTrait,
    recipient_id: Id,
    counterpart_id: Id,
) -> Result<u64, Error> {
    let result = Entity::update_many()
        .col_expr(
            Column::ReadAt,
            Expr::value(Some(DateTimeWithTimeZone::from(Utc::now()))),
        )
        .filter(Column::RecipientId.eq(recipient_id))
        .filter(Column::SenderId.eq(counterpart_id))
        .filter(Column::ReadAt.is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

pub async fn unread_count(db: &impl ConnectionTrait, recipient_id: Id) -> Result<u64, Error> {
    Ok(Entity::find()
        .filter(Column::RecipientId.eq(recipient_id))
        .filter(Column::ReadAt.is_null())
        .count(db)
        .await?)
}

/// Unread message counts for the recipient, grouped by sender.
pub async fn unread_counts_by_sender(
    db: &impl ConnectionTrait,
    recipient_id: Id,
) -> Result<Vec<(Id, i64)>, Error> {
    Ok(Entity::find()
        .select_only()
        .column(Column::SenderId)
        .column_as(Column::Id.count(), "count")
        .filter(Column::RecipientId.eq(recipient_id))
        .filter(Column::ReadAt.is_null())
        .group_by(Column::SenderId)
        .into_tuple::<(Id, i64)>()
        .all(db)
        .await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    #[tokio::test]
    async fn conversation_selects_both_directions() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let user_id = Id::new_v4();
        let counterpart_id = Id::new_v4();
        let _ = conversation(&db, user_id, counterpart_id, None, 50).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "messages"."id", "messages"."tenant_id", "messages"."sender_id", "messages"."recipient_id", "messages"."body", "messages"."read_at", "messages"."created_at" FROM "fitcoach_platform"."messages" WHERE ("messages"."sender_id" = $1 AND "messages"."recipient_id" = $2) OR ("messages"."sender_id" = $3 AND "messages"."recipient_id" = $4) ORDER BY "messages"."created_at" DESC LIMIT $5"#,
                [
                    user_id.into(),
                    counterpart_id.into(),
                    counterpart_id.into(),
                    user_id.into(),
                    50u64.into()
                ]
            )]
        );

        Ok(())
    }
}
