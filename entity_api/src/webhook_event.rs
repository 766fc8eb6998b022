use super::error::Error;
use chrono::Utc;
use entity::webhook_events::{ActiveModel, Column, Entity};
use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, ActiveValue::Set, ConnectionTrait, TryInsertResult,
};

use log::*;

/// Outcome of attempting to claim a webhook event for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResult {
    /// First delivery of this event; the caller should process it.
    Claimed,
    /// The event id was already recorded; the caller should acknowledge
    /// without reprocessing.
    AlreadyProcessed,
}

/// Claims a Stripe event id by inserting it into the ledger. The unique
/// index on `stripe_event_id` arbitrates concurrent deliveries: whichever
/// insert lands first wins, every other delivery observes a conflict.
pub async fn claim(
    db: &impl ConnectionTrait,
    stripe_event_id: &str,
    event_type: &str,
) -> Result<ClaimResult, Error> {
    let active_model = ActiveModel {
        stripe_event_id: Set(stripe_event_id.to_string()),
        event_type: Set(event_type.to_string()),
        processed_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let result = Entity::insert(active_model)
        .on_conflict(
            OnConflict::column(Column::StripeEventId)
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;

    match result {
        TryInsertResult::Inserted(_) => Ok(ClaimResult::Claimed),
        _ => {
            debug!("Webhook event {stripe_event_id} was already processed");
            Ok(ClaimResult::AlreadyProcessed)
        }
    }
}
