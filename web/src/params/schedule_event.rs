use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use utoipa::IntoParams;

use domain::Id;

/// Filters for the schedule listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IndexParams {
    pub trainer_id: Option<Id>,
    pub student_id: Option<Id>,
    #[param(value_type = Option<String>, format = DateTime)]
    pub from: Option<DateTime<FixedOffset>>,
    #[param(value_type = Option<String>, format = DateTime)]
    pub until: Option<DateTime<FixedOffset>>,
}
