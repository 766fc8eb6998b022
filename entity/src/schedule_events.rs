use crate::{schedule_event_status::ScheduleEventStatus, Id};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::schedule_events::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "schedule_events")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    #[serde(skip_deserializing)]
    #[schema(value_type = Uuid)]
    pub tenant_id: Id,
    #[serde(skip_deserializing)]
    #[schema(value_type = Uuid)]
    pub trainer_id: Id,
    #[schema(value_type = Uuid)]
    pub student_id: Id,
    pub title: String,
    #[schema(value_type = String, format = DateTime)]
    pub starts_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub ends_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    pub status: ScheduleEventStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Students,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TrainerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Trainers,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trainers.def()
    }
}
