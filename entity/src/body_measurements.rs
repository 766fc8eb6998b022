use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::body_measurements::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "body_measurements")]
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
    pub measured_on: Date,
    #[sea_orm(column_type = "Double")]
    pub weight_kg: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub body_fat_percent: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub chest_cm: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub waist_cm: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub hip_cm: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub arm_cm: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub thigh_cm: Option<f64>,
    pub notes: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
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
