use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "schedule_event_status")]
pub enum ScheduleEventStatus {
    #[sea_orm(string_value = "scheduled")]
    #[default]
    Scheduled,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl ScheduleEventStatus {
    /// Whether an event in this status can still change.
    /// `cancelled` and `completed` are terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScheduleEventStatus::Cancelled | ScheduleEventStatus::Completed
        )
    }
}

impl std::fmt::Display for ScheduleEventStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleEventStatus::Scheduled => write!(fmt, "scheduled"),
            ScheduleEventStatus::Confirmed => write!(fmt, "confirmed"),
            ScheduleEventStatus::Cancelled => write!(fmt, "cancelled"),
            ScheduleEventStatus::Completed => write!(fmt, "completed"),
        }
    }
}
