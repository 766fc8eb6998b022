use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_kind")]
pub enum NotificationKind {
    #[sea_orm(string_value = "message")]
    Message,
    #[sea_orm(string_value = "schedule")]
    Schedule,
    #[sea_orm(string_value = "workout")]
    Workout,
    #[sea_orm(string_value = "billing")]
    Billing,
    #[sea_orm(string_value = "system")]
    #[default]
    System,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Message => write!(fmt, "message"),
            NotificationKind::Schedule => write!(fmt, "schedule"),
            NotificationKind::Workout => write!(fmt, "workout"),
            NotificationKind::Billing => write!(fmt, "billing"),
            NotificationKind::System => write!(fmt, "system"),
        }
    }
}
