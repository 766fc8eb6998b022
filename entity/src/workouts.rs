use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::workouts::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "workouts")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    #[serde(skip_deserializing)]
    #[schema(value_type = Uuid)]
    pub tenant_id: Id,
    #[schema(value_type = Uuid)]
    pub student_id: Id,
    pub name: String,
    pub description: Option<String>,
    /// Days of the week (0 = Sunday .. 6 = Saturday) the plan is scheduled on.
    #[schema(value_type = Vec<u8>)]
    pub weekdays: Json,
    #[serde(skip_deserializing)]
    pub active: bool,
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
    #[sea_orm(has_many = "super::exercises::Entity")]
    Exercises,
    #[sea_orm(has_many = "super::workout_logs::Entity")]
    WorkoutLogs,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::exercises::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercises.def()
    }
}

impl Related<super::workout_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkoutLogs.def()
    }
}
