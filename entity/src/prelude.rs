pub use super::activation_tokens::Entity as ActivationTokens;
pub use super::audit_logs::Entity as AuditLogs;
pub use super::body_measurements::Entity as BodyMeasurements;
pub use super::exercises::Entity as Exercises;
pub use super::invoices::Entity as Invoices;
pub use super::messages::Entity as Messages;
pub use super::notifications::Entity as Notifications;
pub use super::payments::Entity as Payments;
pub use super::physical_assessments::Entity as PhysicalAssessments;
pub use super::schedule_events::Entity as ScheduleEvents;
pub use super::students::Entity as Students;
pub use super::subscriptions::Entity as Subscriptions;
pub use super::tenants::Entity as Tenants;
pub use super::users::Entity as Users;
pub use super::webhook_events::Entity as WebhookEvents;
pub use super::workout_logs::Entity as WorkoutLogs;
pub use super::workouts::Entity as Workouts;
