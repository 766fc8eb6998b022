use chrono::NaiveDate;
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{student_status::StudentStatus, Id, IntoUpdateMap, UpdateMap};

/// Filters and sorting for the student list.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IndexParams {
    pub status: Option<StudentStatus>,
    pub trainer_id: Option<Id>,
    /// Sort by field. Valid values: 'name', 'created_at'.
    pub sort_by: Option<StudentSortField>,
}

#[derive(Debug, Deserialize, ToSchema, Clone, Copy)]
pub enum StudentSortField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "created_at")]
    CreatedAt,
}

impl IndexParams {
    pub fn sort(&self) -> domain::student::StudentSort {
        match self.sort_by.unwrap_or(StudentSortField::Name) {
            StudentSortField::Name => domain::student::StudentSort::Name,
            StudentSortField::CreatedAt => domain::student::StudentSort::CreatedAt,
        }
    }
}

/// Body for inviting a new student.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InviteParams {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub trainer_id: Option<Id>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub goal: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdateParams {
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub goal: Option<String>,
    pub notes: Option<String>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(birth_date) = self.birth_date {
            update_map.insert(
                "birth_date".to_string(),
                Some(Value::ChronoDate(Some(Box::new(birth_date)))),
            );
        }
        if let Some(goal) = self.goal {
            update_map.insert(
                "goal".to_string(),
                Some(Value::String(Some(Box::new(goal)))),
            );
        }
        if let Some(notes) = self.notes {
            update_map.insert(
                "notes".to_string(),
                Some(Value::String(Some(Box::new(notes)))),
            );
        }
        update_map
    }
}

/// Body for reassigning a student to a different trainer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReassignParams {
    /// The new trainer, or null to unassign.
    pub trainer_id: Option<Id>,
}

/// Body for completing account activation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivateParams {
    pub password: String,
}
