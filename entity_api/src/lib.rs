pub use entity::{
    activation_tokens, audit_logs, body_measurements, exercises, invoices, messages,
    notification_kind, notifications, payments, physical_assessments, roles,
    schedule_event_status, schedule_events, student_status, students, subscription_status,
    subscriptions, tenant_status, tenants, users, webhook_events, workout_logs, workouts, Id,
};

pub mod activation_token;
pub mod audit_log;
pub mod body_measurement;
pub mod error;
pub mod exercise;
pub mod invoice;
pub mod message;
pub mod mutate;
pub mod notification;
pub mod payment;
pub mod physical_assessment;
pub mod schedule_event;
pub mod seed;
pub mod student;
pub mod subscription;
pub mod tenant;
pub mod user;
pub mod webhook_event;
pub mod workout;
pub mod workout_log;
