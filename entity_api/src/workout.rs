use super::error::{EntityApiErrorKind, Error};
use crate::exercise;
use chrono::Utc;
use entity::{
    exercises,
    workouts::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
    TransactionTrait,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, workout_model: Model) -> Result<Model, Error> {
    debug!("New Workout Model to be inserted: {workout_model:?}");

    let now = Utc::now();
    let workout_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(workout_model.tenant_id),
        student_id: Set(workout_model.student_id),
        name: Set(workout_model.name),
        description: Set(workout_model.description),
        weekdays: Set(workout_model.weekdays),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(workout_active_model.insert(db).await?)
}

/// Creates a workout and its exercises in one transaction. Exercise
/// positions are assigned from the order of the input slice.
pub async fn create_with_exercises(
    db: &impl TransactionTrait,
    workout_model: Model,
    exercise_models: Vec<exercises::Model>,
) -> Result<(Model, Vec<exercises::Model>), Error> {
    let txn = db.begin().await?;

    let workout = create(&txn, workout_model).await?;

    let mut created_exercises = Vec::with_capacity(exercise_models.len());
    for (position, exercise_model) in exercise_models.into_iter().enumerate() {
        let created =
            exercise::create(&txn, workout.id, exercise_model, position as i32).await?;
        created_exercises.push(created);
    }

    txn.commit().await?;

    Ok((workout, created_exercises))
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_student(
    db: &impl ConnectionTrait,
    student_id: Id,
    only_active: bool,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find().filter(Column::StudentId.eq(student_id));
    if only_active {
        query = query.filter(Column::Active.eq(true));
    }
    Ok(query.order_by_desc(Column::CreatedAt).all(db).await?)
}

pub async fn find_with_exercises(
    db: &impl ConnectionTrait,
    id: Id,
) -> Result<(Model, Vec<exercises::Model>), Error> {
    let workout = find_by_id(db, id).await?;
    let exercises = workout
        .find_related(exercises::Entity)
        .order_by_asc(exercises::Column::Position)
        .all(db)
        .await?;
    Ok((workout, exercises))
}

pub async fn set_active(db: &impl ConnectionTrait, id: Id, active: bool) -> Result<Model, Error> {
    let workout = find_by_id(db, id).await?;

    let active_model = ActiveModel {
        id: Unchanged(workout.id),
        active: Set(active),
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
    async fn find_by_student_filters_active_workouts_when_asked() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let student_id = Id::new_v4();
        let _ = find_by_student(&db, student_id, true).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "workouts"."id", "workouts"."tenant_id", "workouts"."student_id", "workouts"."name", "workouts"."description", "workouts"."weekdays", "workouts"."active", "workouts"."created_at", "workouts"."updated_at" FROM "fitcoach_platform"."workouts" WHERE "workouts"."student_id" = $1 AND "workouts"."active" = $2 ORDER BY "workouts"."created_at" DESC"#,
                [student_id.into(), true.into()]
            )]
        );

        Ok(())
    }
}
