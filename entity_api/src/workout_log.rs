use super::error::{EntityApiErrorKind, Error};
use chrono::{NaiveDate, Utc};
use entity::{
    workout_logs::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, QueryOrder};

use log::*;

pub async fn create(db: &impl ConnectionTrait, log_model: Model) -> Result<Model, Error> {
    debug!("New WorkoutLog Model to be inserted: {log_model:?}");

    let log_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(log_model.tenant_id),
        student_id: Set(log_model.student_id),
        workout_id: Set(log_model.workout_id),
        logged_on: Set(log_model.logged_on),
        duration_minutes: Set(log_model.duration_minutes),
        perceived_effort: Set(log_model.perceived_effort),
        comment: Set(log_model.comment),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(log_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Whether the student has already logged this workout on the given day.
pub async fn exists_for_day(
    db: &impl ConnectionTrait,
    student_id: Id,
    workout_id: Id,
    logged_on: NaiveDate,
) -> Result<bool, Error> {
    let count = Entity::find()
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::WorkoutId.eq(workout_id))
        .filter(Column::LoggedOn.eq(logged_on))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn find_by_student(
    db: &impl ConnectionTrait,
    student_id: Id,
    workout_id: Option<Id>,
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find().filter(Column::StudentId.eq(student_id));

    if let Some(workout_id) = workout_id {
        query = query.filter(Column::WorkoutId.eq(workout_id));
    }
    if let Some(from) = from {
        query = query.filter(Column::LoggedOn.gte(from));
    }
    if let Some(until) = until {
        query = query.filter(Column::LoggedOn.lte(until));
    }

    Ok(query.order_by_desc(Column::LoggedOn).all(db).await?)
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
    async fn find_by_student_applies_date_range_filters() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let student_id = Id::new_v4();
        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let _ = find_by_student(&db, student_id, None, Some(from), Some(until)).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "workout_logs"."id", "workout_logs"."tenant_id", "workout_logs"."student_id", "workout_logs"."workout_id", "workout_logs"."logged_on", "workout_logs"."duration_minutes", "workout_logs"."perceived_effort", "workout_logs"."comment", "workout_logs"."created_at" FROM "fitcoach_platform"."workout_logs" WHERE "workout_logs"."student_id" = $1 AND "workout_logs"."logged_on" >= $2 AND "workout_logs"."logged_on" <= $3 ORDER BY "workout_logs"."logged_on" DESC"#,
                [student_id.into(), from.into(), until.into()]
            )]
        );

        Ok(())
    }
}
