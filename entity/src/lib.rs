use uuid::Uuid;

pub mod prelude;

// Core entities
pub mod activation_tokens;
pub mod audit_logs;
pub mod body_measurements;
pub mod exercises;
pub mod messages;
pub mod notification_kind;
pub mod notifications;
pub mod physical_assessments;
pub mod roles;
pub mod schedule_event_status;
pub mod schedule_events;
pub mod student_status;
pub mod students;
pub mod tenant_status;
pub mod tenants;
pub mod users;
pub mod workout_logs;
pub mod workouts;

// Billing entities
pub mod invoices;
pub mod payments;
pub mod subscription_status;
pub mod subscriptions;
pub mod webhook_events;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
