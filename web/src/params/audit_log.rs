use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use domain::Id;

/// Filters for the super-admin audit log listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IndexParams {
    pub tenant_id: Option<Id>,
    /// Dotted action name, e.g. "student.create".
    pub action: Option<String>,
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub until: Option<NaiveDate>,
}
