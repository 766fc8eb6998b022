//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with update maps within the domain layer, while encapsulating
//! the underlying implementation details remain in the `entity_api` crate.
pub use entity_api::mutate::{IntoUpdateMap, UpdateMap};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
    activation_tokens, audit_logs, body_measurements, exercises, invoices, messages,
    notification_kind, notifications, payments, physical_assessments, roles,
    schedule_event_status, schedule_events, student_status, students, subscription_status,
    subscriptions, tenant_status, tenants, users, workout_logs, workouts, Id,
};

pub mod audit;
pub mod billing;
pub mod body_measurement;
pub mod emails;
pub mod error;
pub mod message;
pub mod notification;
pub mod physical_assessment;
pub mod schedule_event;
pub mod student;
pub mod tenant;
pub mod user;
pub mod workout;
pub mod workout_log;

pub mod gateway;
