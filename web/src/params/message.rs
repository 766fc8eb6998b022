use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::Id;

/// Body for sending a chat message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendParams {
    pub recipient_id: Id,
    pub body: String,
}

/// Paging parameters for a conversation, newest first. `before` excludes
/// messages created at or after the given instant.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ConversationParams {
    #[param(value_type = Option<String>, format = DateTime)]
    pub before: Option<DateTime<FixedOffset>>,
    pub limit: Option<u64>,
}
