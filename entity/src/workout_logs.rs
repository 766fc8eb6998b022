use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::workout_logs::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "workout_logs")]
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
    pub student_id: Id,
    #[schema(value_type = Uuid)]
    pub workout_id: Id,
    #[schema(value_type = String, format = Date)]
    pub logged_on: Date,
    pub duration_minutes: Option<i32>,
    /// RPE on a 1-10 scale.
    pub perceived_effort: Option<i32>,
    pub comment: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workouts::Entity",
        from = "Column::WorkoutId",
        to = "super::workouts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Workouts,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Students,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::workouts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workouts.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}
