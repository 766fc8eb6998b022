use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    exercises::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait,
    DatabaseConnection, QueryOrder, TransactionTrait,
};

pub async fn create(
    db: &impl ConnectionTrait,
    workout_id: Id,
    exercise_model: Model,
    position: i32,
) -> Result<Model, Error> {
    let now = Utc::now();
    let exercise_active_model: ActiveModel = ActiveModel {
        workout_id: Set(workout_id),
        name: Set(exercise_model.name),
        sets: Set(exercise_model.sets),
        reps: Set(exercise_model.reps),
        rest_seconds: Set(exercise_model.rest_seconds),
        load: Set(exercise_model.load),
        video_url: Set(exercise_model.video_url),
        position: Set(position),
        notes: Set(exercise_model.notes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(exercise_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_workout(db: &impl ConnectionTrait, workout_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::WorkoutId.eq(workout_id))
        .order_by_asc(Column::Position)
        .all(db)
        .await?)
}

pub async fn update(db: &impl ConnectionTrait, id: Id, model: Model) -> Result<Model, Error> {
    let exercise = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(exercise.id),
        workout_id: Unchanged(exercise.workout_id),
        name: Set(model.name),
        sets: Set(model.sets),
        reps: Set(model.reps),
        rest_seconds: Set(model.rest_seconds),
        load: Set(model.load),
        video_url: Set(model.video_url),
        position: Unchanged(exercise.position),
        notes: Set(model.notes),
        created_at: Unchanged(exercise.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let exercise_model = find_by_id(db, id).await?;
    exercise_model.delete(db).await?;
    Ok(())
}

/// Rewrites the position of every exercise in a workout to match the order
/// of `exercise_ids`. The id set must exactly cover the workout's exercises.
pub async fn reorder(
    db: &DatabaseConnection,
    workout_id: Id,
    exercise_ids: Vec<Id>,
) -> Result<Vec<Model>, Error> {
    let txn = db.begin().await?;

    let existing = Entity::find()
        .filter(Column::WorkoutId.eq(workout_id))
        .all(&txn)
        .await?;

    if existing.len() != exercise_ids.len()
        || !exercise_ids
            .iter()
            .all(|id| existing.iter().any(|e| e.id == *id))
    {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::ValidationError,
        });
    }

    for (position, exercise_id) in exercise_ids.iter().enumerate() {
        let active_model = ActiveModel {
            id: Unchanged(*exercise_id),
            position: Set(position as i32),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        active_model.update(&txn).await?;
    }

    txn.commit().await?;

    find_by_workout(db, workout_id).await
}
