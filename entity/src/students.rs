use crate::{student_status::StudentStatus, Id};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::students::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "students")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    #[serde(skip_deserializing)]
    #[schema(value_type = Uuid)]
    pub tenant_id: Id,
    /// Exactly one user account per student.
    #[serde(skip_deserializing)]
    #[sea_orm(unique)]
    #[schema(value_type = Uuid)]
    pub user_id: Id,
    /// The trainer this student is assigned to, if any.
    #[schema(value_type = Option<Uuid>)]
    pub trainer_id: Option<Id>,
    #[serde(skip_deserializing)]
    pub status: StudentStatus,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<Date>,
    pub goal: Option<String>,
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
        belongs_to = "super::tenants::Entity",
        from = "Column::TenantId",
        to = "super::tenants::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Tenants,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TrainerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Trainers,
    #[sea_orm(has_many = "super::workouts::Entity")]
    Workouts,
    #[sea_orm(has_many = "super::body_measurements::Entity")]
    BodyMeasurements,
    #[sea_orm(has_many = "super::physical_assessments::Entity")]
    PhysicalAssessments,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::tenants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::workouts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workouts.def()
    }
}

impl Related<super::body_measurements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BodyMeasurements.def()
    }
}

impl Related<super::physical_assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhysicalAssessments.def()
    }
}
