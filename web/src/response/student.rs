use domain::{students, users};
use serde::Serialize;
use utoipa::ToSchema;

/// A student row joined with its user account, as shown in lists and detail
/// views.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentWithUser {
    #[serde(flatten)]
    pub student: students::Model,
    pub user: Option<users::Model>,
}

impl StudentWithUser {
    pub fn new(student: students::Model, user: Option<users::Model>) -> Self {
        Self { student, user }
    }
}
