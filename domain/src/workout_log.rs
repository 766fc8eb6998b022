use crate::error::Error;
use crate::{
    notification, notification_kind::NotificationKind, student, users, workout_logs::Model, Id,
};
use chrono::NaiveDate;
use entity_api::{user, workout, workout_log};
use sea_orm::DatabaseConnection;
use service::config::Config;

/// Records a completed workout for the calling student and notifies their
/// trainer. At most one log per workout per calendar day.
pub async fn record(
    db: &DatabaseConnection,
    config: &Config,
    student_user: &users::Model,
    mut log_model: Model,
) -> Result<Model, Error> {
    let student_record = student::find_by_user_id(db, student_user.id).await?;

    let workout = workout::find_by_id(db, log_model.workout_id).await?;
    if workout.student_id != student_record.id {
        return Err(Error::forbidden("workout does not belong to this student"));
    }
    if !workout.active {
        return Err(Error::invalid("inactive workouts cannot be logged"));
    }
    if let Some(effort) = log_model.perceived_effort {
        if !(1..=10).contains(&effort) {
            return Err(Error::invalid("perceived effort must be between 1 and 10"));
        }
    }

    if workout_log::exists_for_day(db, student_record.id, workout.id, log_model.logged_on).await? {
        return Err(Error::invalid("this workout was already logged today"));
    }

    log_model.tenant_id = student_record.tenant_id;
    log_model.student_id = student_record.id;
    let log = workout_log::create(db, log_model).await?;

    if let Some(trainer_id) = student_record.trainer_id {
        if let Ok(trainer) = user::find_by_id(db, trainer_id).await {
            notification::notify(
                db,
                config,
                student_record.tenant_id,
                &trainer,
                NotificationKind::Workout,
                "Workout completed",
                &format!(
                    "{} completed {}",
                    student_user.full_name(),
                    workout.name
                ),
            )
            .await;
        }
    }

    Ok(log)
}

/// Lists logs for one student with optional workout and date-range filters.
pub async fn find_for_student(
    db: &DatabaseConnection,
    student_id: Id,
    workout_id: Option<Id>,
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<Vec<Model>, Error> {
    Ok(workout_log::find_by_student(db, student_id, workout_id, from, until).await?)
}
