use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{Id, IntoUpdateMap, UpdateMap};

/// Body for creating a workout together with its exercises. Exercise
/// positions are taken from the order of the array.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParams {
    pub student_id: Id,
    pub name: String,
    pub description: Option<String>,
    /// Days of the week (0 = Sunday .. 6 = Saturday).
    pub weekdays: Vec<u8>,
    pub exercises: Vec<ExerciseParams>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExerciseParams {
    pub name: String,
    pub sets: i32,
    pub reps: String,
    pub rest_seconds: Option<i32>,
    pub load: Option<String>,
    pub video_url: Option<String>,
    pub notes: Option<String>,
}

impl ExerciseParams {
    pub fn into_model(self) -> domain::exercises::Model {
        domain::exercises::Model {
            id: Id::default(),
            workout_id: Id::default(),
            name: self.name,
            sets: self.sets,
            reps: self.reps,
            rest_seconds: self.rest_seconds,
            load: self.load,
            video_url: self.video_url,
            position: 0,
            notes: self.notes,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdateParams {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Days of the week (0 = Sunday .. 6 = Saturday).
    pub weekdays: Option<Vec<u8>>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert(
                "name".to_string(),
                Some(Value::String(Some(Box::new(name)))),
            );
        }
        if let Some(description) = self.description {
            update_map.insert(
                "description".to_string(),
                Some(Value::String(Some(Box::new(description)))),
            );
        }
        if let Some(weekdays) = self.weekdays {
            update_map.insert(
                "weekdays".to_string(),
                Some(Value::Json(Some(Box::new(serde_json::json!(weekdays))))),
            );
        }
        update_map
    }
}

/// Body for reordering a workout's exercises: every exercise id, in the
/// desired order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderParams {
    pub exercise_ids: Vec<Id>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_update_maps_to_a_json_value() {
        let params = UpdateParams {
            name: None,
            description: None,
            weekdays: Some(vec![1, 4]),
        };

        let update_map = params.into_update_map();
        assert!(update_map.get("weekdays").is_some());
        assert!(update_map.get("name").is_none());
    }
}
