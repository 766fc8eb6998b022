use crate::error::Error;
use crate::{exercises, student, users, workouts::Model, Id};
use entity_api::{exercise, mutate, workout};
use log::*;
use sea_orm::{DatabaseConnection, IntoActiveModel};

pub use entity_api::workout::{find_by_id, find_by_student, find_with_exercises};

/// Parses and validates a workout's weekday list (0 = Sunday .. 6 = Saturday).
pub fn validate_weekdays(weekdays: &serde_json::Value) -> Result<(), Error> {
    let days = weekdays
        .as_array()
        .ok_or_else(|| Error::invalid("weekdays must be an array of 0-6"))?;
    for day in days {
        match day.as_i64() {
            Some(0..=6) => {}
            _ => return Err(Error::invalid("weekdays must be an array of 0-6")),
        }
    }
    Ok(())
}

/// Creates a workout with its exercises for a student the trainer can access.
pub async fn create(
    db: &DatabaseConnection,
    trainer: &users::Model,
    mut workout_model: Model,
    exercise_models: Vec<exercises::Model>,
) -> Result<(Model, Vec<exercises::Model>), Error> {
    let student_record = student::find_by_id(db, workout_model.student_id).await?;
    if !student::can_access(trainer, &student_record) {
        return Err(Error::forbidden(
            "workouts can only be created for accessible students",
        ));
    }

    validate_weekdays(&workout_model.weekdays)?;
    validate_exercises(&exercise_models)?;

    workout_model.tenant_id = student_record.tenant_id;
    let (workout, exercises) =
        workout::create_with_exercises(db, workout_model, exercise_models).await?;

    info!(
        "Created workout {} with {} exercise(s) for student {}",
        workout.id,
        exercises.len(),
        workout.student_id
    );
    Ok((workout, exercises))
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl mutate::IntoUpdateMap + std::fmt::Debug,
) -> Result<Model, Error> {
    debug!("Updating workout {id} with {params:?}");
    let existing = workout::find_by_id(db, id).await?;
    let active_model = existing.into_active_model();
    Ok(mutate::update::<
        crate::workouts::ActiveModel,
        crate::workouts::Column,
    >(db, active_model, params.into_update_map())
    .await?)
}

/// Soft-deactivates a workout; it disappears from the student's plan list.
pub async fn deactivate(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(workout::set_active(db, id, false).await?)
}

pub async fn add_exercise(
    db: &DatabaseConnection,
    workout_id: Id,
    exercise_model: exercises::Model,
) -> Result<exercises::Model, Error> {
    validate_exercise(&exercise_model)?;
    let existing = exercise::find_by_workout(db, workout_id).await?;
    let position = existing.len() as i32;
    Ok(exercise::create(db, workout_id, exercise_model, position).await?)
}

pub async fn update_exercise(
    db: &DatabaseConnection,
    workout_id: Id,
    exercise_id: Id,
    exercise_model: exercises::Model,
) -> Result<exercises::Model, Error> {
    validate_exercise(&exercise_model)?;
    ensure_exercise_in_workout(db, workout_id, exercise_id).await?;
    Ok(exercise::update(db, exercise_id, exercise_model).await?)
}

pub async fn delete_exercise(
    db: &DatabaseConnection,
    workout_id: Id,
    exercise_id: Id,
) -> Result<(), Error> {
    ensure_exercise_in_workout(db, workout_id, exercise_id).await?;
    Ok(exercise::delete_by_id(db, exercise_id).await?)
}

pub async fn reorder_exercises(
    db: &DatabaseConnection,
    workout_id: Id,
    exercise_ids: Vec<Id>,
) -> Result<Vec<exercises::Model>, Error> {
    Ok(exercise::reorder(db, workout_id, exercise_ids).await?)
}

async fn ensure_exercise_in_workout(
    db: &DatabaseConnection,
    workout_id: Id,
    exercise_id: Id,
) -> Result<(), Error> {
    let exercise = exercise::find_by_id(db, exercise_id).await?;
    if exercise.workout_id != workout_id {
        return Err(Error::invalid("exercise does not belong to this workout"));
    }
    Ok(())
}

fn validate_exercises(exercise_models: &[exercises::Model]) -> Result<(), Error> {
    if exercise_models.is_empty() {
        return Err(Error::invalid("a workout needs at least one exercise"));
    }
    for exercise_model in exercise_models {
        validate_exercise(exercise_model)?;
    }
    Ok(())
}

fn validate_exercise(exercise_model: &exercises::Model) -> Result<(), Error> {
    if exercise_model.name.trim().is_empty() {
        return Err(Error::invalid("exercise name must not be empty"));
    }
    if exercise_model.sets < 1 {
        return Err(Error::invalid("exercise sets must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weekday_validation_accepts_0_through_6() {
        assert!(validate_weekdays(&json!([0, 3, 6])).is_ok());
        assert!(validate_weekdays(&json!([])).is_ok());
        assert!(validate_weekdays(&json!([7])).is_err());
        assert!(validate_weekdays(&json!([-1])).is_err());
        assert!(validate_weekdays(&json!("monday")).is_err());
    }

    #[test]
    fn exercise_validation_requires_name_and_sets() {
        let exercise = exercises::Model {
            id: Id::new_v4(),
            workout_id: Id::new_v4(),
            name: "Back Squat".to_string(),
            sets: 5,
            reps: "5".to_string(),
            rest_seconds: Some(120),
            load: None,
            video_url: None,
            position: 0,
            notes: None,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        };
        assert!(validate_exercise(&exercise).is_ok());

        let mut unnamed = exercise.clone();
        unnamed.name = "  ".to_string();
        assert!(validate_exercise(&unnamed).is_err());

        let mut setless = exercise;
        setless.sets = 0;
        assert!(validate_exercise(&setless).is_err());
    }

    #[test]
    fn a_workout_needs_at_least_one_exercise() {
        assert!(validate_exercises(&[]).is_err());
    }
}
