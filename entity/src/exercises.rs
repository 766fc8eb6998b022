use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::exercises::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "exercises")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    #[serde(skip_deserializing)]
    #[schema(value_type = Uuid)]
    pub workout_id: Id,
    pub name: String,
    pub sets: i32,
    /// Free text so trainers can prescribe ranges, e.g. "10-12".
    pub reps: String,
    pub rest_seconds: Option<i32>,
    pub load: Option<String>,
    pub video_url: Option<String>,
    /// Ordering within the workout.
    #[serde(skip_deserializing)]
    pub position: i32,
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
        belongs_to = "super::workouts::Entity",
        from = "Column::WorkoutId",
        to = "super::workouts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Workouts,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::workouts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workouts.def()
    }
}
