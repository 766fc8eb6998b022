use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, ToSchema, Serialize, Deserialize)]
#[schema(as = domain::audit_logs::Model)] // OpenAPI schema
#[sea_orm(schema_name = "fitcoach_platform", table_name = "audit_logs")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    /// NULL for platform-level (super admin) actions.
    #[schema(value_type = Option<Uuid>)]
    pub tenant_id: Option<Id>,
    /// NULL for changes driven by webhooks rather than a user.
    #[schema(value_type = Option<Uuid>)]
    pub user_id: Option<Id>,
    /// Dotted action name, e.g. "student.create" or "tenant.suspend".
    pub action: String,
    pub entity_type: String,
    #[schema(value_type = Option<Uuid>)]
    pub entity_id: Option<Id>,
    #[schema(value_type = Object)]
    pub detail: Json,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)] // Applies to OpenAPI schema
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenants::Entity",
        from = "Column::TenantId",
        to = "super::tenants::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Tenants,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::tenants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}
