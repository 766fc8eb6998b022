use crate::error::Error;
use crate::{
    notification, notification_kind::NotificationKind,
    schedule_event_status::ScheduleEventStatus, schedule_events::Model, student, users, Id,
};
use chrono::{DateTime, DurationRound, FixedOffset, TimeDelta};
use entity_api::schedule_event;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;

pub use entity_api::schedule_event::{find_by_id, find_by_tenant};

/// Legal status transitions for an appointment. `cancelled` and
/// `completed` are terminal.
pub fn can_transition(from: ScheduleEventStatus, to: ScheduleEventStatus) -> bool {
    use ScheduleEventStatus::*;
    matches!(
        (from, to),
        (Scheduled, Confirmed) | (Scheduled, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
    )
}

/// Creates an appointment and notifies the student, best effort.
pub async fn create(
    db: &DatabaseConnection,
    config: &Config,
    trainer: &users::Model,
    mut event_model: Model,
) -> Result<Model, Error> {
    let student_record = student::find_by_id(db, event_model.student_id).await?;
    if !student::can_access(trainer, &student_record) {
        return Err(Error::forbidden(
            "appointments can only be created for accessible students",
        ));
    }

    validate_times(event_model.starts_at, event_model.ends_at)?;
    // Appointments are scheduled by the minute.
    event_model.starts_at = truncate_to_minute(event_model.starts_at)?;

    event_model.tenant_id = student_record.tenant_id;
    event_model.trainer_id = trainer.id;
    let event = schedule_event::create(db, event_model).await?;

    let (_, student_user) = student::find_with_user(db, student_record.id).await?;
    notification::notify(
        db,
        config,
        event.tenant_id,
        &student_user,
        NotificationKind::Schedule,
        "New appointment",
        &format!(
            "{} on {}",
            event.title,
            event.starts_at.format("%Y-%m-%d %H:%M")
        ),
    )
    .await;

    Ok(event)
}

/// Updates an appointment's details. Terminal events cannot change.
pub async fn update(db: &DatabaseConnection, id: Id, mut model: Model) -> Result<Model, Error> {
    let existing = schedule_event::find_by_id(db, id).await?;
    if existing.status.is_terminal() {
        return Err(Error::invalid(
            "cancelled or completed appointments cannot be changed",
        ));
    }

    validate_times(model.starts_at, model.ends_at)?;
    model.starts_at = truncate_to_minute(model.starts_at)?;

    Ok(schedule_event::update(db, id, model).await?)
}

/// Moves an appointment to a new status, enforcing the transition rules.
pub async fn transition(
    db: &DatabaseConnection,
    id: Id,
    to: ScheduleEventStatus,
) -> Result<Model, Error> {
    let existing = schedule_event::find_by_id(db, id).await?;
    if !can_transition(existing.status.clone(), to.clone()) {
        warn!(
            "Rejected schedule event transition {} -> {to} for {id}",
            existing.status
        );
        return Err(Error::invalid("illegal appointment status transition"));
    }

    Ok(schedule_event::set_status(db, id, to).await?)
}

fn validate_times(
    starts_at: DateTime<FixedOffset>,
    ends_at: DateTime<FixedOffset>,
) -> Result<(), Error> {
    if ends_at <= starts_at {
        return Err(Error::invalid("appointment must end after it starts"));
    }
    Ok(())
}

fn truncate_to_minute(value: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>, Error> {
    value.duration_trunc(TimeDelta::minutes(1)).map_err(|err| {
        warn!("Failed to truncate appointment time: {err:?}");
        Error::invalid("appointment start time out of range")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScheduleEventStatus::*;

    #[test]
    fn scheduled_events_can_be_confirmed_or_cancelled() {
        assert!(can_transition(Scheduled, Confirmed));
        assert!(can_transition(Scheduled, Cancelled));
        assert!(!can_transition(Scheduled, Completed));
    }

    #[test]
    fn confirmed_events_can_be_cancelled_or_completed() {
        assert!(can_transition(Confirmed, Cancelled));
        assert!(can_transition(Confirmed, Completed));
        assert!(!can_transition(Confirmed, Scheduled));
    }

    #[test]
    fn terminal_states_accept_no_transitions() {
        for to in [Scheduled, Confirmed, Cancelled, Completed] {
            assert!(!can_transition(Cancelled, to.clone()));
            assert!(!can_transition(Completed, to));
        }
    }

    #[test]
    fn validate_times_rejects_inverted_ranges() {
        let start: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2025-06-02T10:00:00+00:00").unwrap();
        let end: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2025-06-02T11:00:00+00:00").unwrap();

        assert!(validate_times(start, end).is_ok());
        assert!(validate_times(end, start).is_err());
        assert!(validate_times(start, start).is_err());
    }

    #[test]
    fn truncate_to_minute_drops_seconds() {
        let value: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2025-06-02T10:00:42+00:00").unwrap();
        let truncated = truncate_to_minute(value).unwrap();
        assert_eq!(truncated.to_rfc3339(), "2025-06-02T10:00:00+00:00");
    }
}
