use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    schedule_event_status::ScheduleEventStatus,
    schedule_events::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, event_model: Model) -> Result<Model, Error> {
    debug!("New ScheduleEvent Model to be inserted: {event_model:?}");

    let now = Utc::now();
    let event_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(event_model.tenant_id),
        trainer_id: Set(event_model.trainer_id),
        student_id: Set(event_model.student_id),
        title: Set(event_model.title),
        starts_at: Set(event_model.starts_at),
        ends_at: Set(event_model.ends_at),
        status: Set(ScheduleEventStatus::Scheduled),
        location: Set(event_model.location),
        notes: Set(event_model.notes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(event_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_tenant(
    db: &impl ConnectionTrait,
    tenant_id: Id,
    trainer_id: Option<Id>,
    student_id: Option<Id>,
    from: Option<DateTimeWithTimeZone>,
    until: Option<DateTimeWithTimeZone>,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find().filter(Column::TenantId.eq(tenant_id));

    if let Some(trainer_id) = trainer_id {
        query = query.filter(Column::TrainerId.eq(trainer_id));
    }
    if let Some(student_id) = student_id {
        query = query.filter(Column::StudentId.eq(student_id));
    }
    if let Some(from) = from {
        query = query.filter(Column::StartsAt.gte(from));
    }
    if let Some(until) = until {
        query = query.filter(Column::StartsAt.lte(until));
    }

    Ok(query.order_by_asc(Column::StartsAt).all(db).await?)
}

pub async fn update(db: &impl ConnectionTrait, id: Id, model: Model) -> Result<Model, Error> {
    let event = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(event.id),
        tenant_id: Unchanged(event.tenant_id),
        trainer_id: Unchanged(event.trainer_id),
        student_id: Unchanged(event.student_id),
        title: Set(model.title),
        starts_at: Set(model.starts_at),
        ends_at: Set(model.ends_at),
        status: Unchanged(event.status),
        location: Set(model.location),
        notes: Set(model.notes),
        created_at: Unchanged(event.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?)
}

pub async fn set_status(
    db: &impl ConnectionTrait,
    id: Id,
    status: ScheduleEventStatus,
) -> Result<Model, Error> {
    let event = find_by_id(db, id).await?;

    let active_model = ActiveModel {
        id: Unchanged(event.id),
        status: Set(status),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
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
    async fn find_by_tenant_filters_by_student_and_orders_by_start() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let tenant_id = Id::new_v4();
        let student_id = Id::new_v4();
        let _ = find_by_tenant(&db, tenant_id, None, Some(student_id), None, None).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "schedule_events"."id", "schedule_events"."tenant_id", "schedule_events"."trainer_id", "schedule_events"."student_id", "schedule_events"."title", "schedule_events"."starts_at", "schedule_events"."ends_at", "schedule_events"."status", "schedule_events"."location", "schedule_events"."notes", "schedule_events"."created_at", "schedule_events"."updated_at" FROM "fitcoach_platform"."schedule_events" WHERE "schedule_events"."tenant_id" = $1 AND "schedule_events"."student_id" = $2 ORDER BY "schedule_events"."starts_at" ASC"#,
                [tenant_id.into(), student_id.into()]
            )]
        );

        Ok(())
    }
}
