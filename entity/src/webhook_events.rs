use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Idempotency ledger for Stripe webhook deliveries. The unique constraint
/// on `stripe_event_id` is what makes concurrent redeliveries safe: the
/// first insert wins, later ones fail and are acknowledged without
/// reprocessing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(schema_name = "fitcoach_platform", table_name = "webhook_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Id,
    #[sea_orm(unique)]
    pub stripe_event_id: String,
    pub event_type: String,
    pub processed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
