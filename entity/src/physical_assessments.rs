use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::physical_assessments::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "physical_assessments")]
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
    #[schema(value_type = String, format = Date)]
    pub assessed_on: Date,
    pub resting_heart_rate: Option<i32>,
    /// Free text, e.g. "120/80".
    pub blood_pressure: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub vo2_max: Option<f64>,
    pub flexibility_score: Option<i32>,
    pub posture_notes: Option<String>,
    pub protocol: Option<String>,
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
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}
