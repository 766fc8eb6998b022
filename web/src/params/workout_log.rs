use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::Id;

/// Body for a student recording a completed workout.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParams {
    pub workout_id: Id,
    #[schema(value_type = String, format = Date)]
    pub logged_on: NaiveDate,
    pub duration_minutes: Option<i32>,
    /// RPE on a 1-10 scale.
    pub perceived_effort: Option<i32>,
    pub comment: Option<String>,
}

/// Filters for listing a student's workout logs.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IndexParams {
    pub workout_id: Option<Id>,
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub until: Option<NaiveDate>,
}
