use domain::{exercises, workouts};
use serde::Serialize;
use utoipa::ToSchema;

/// A workout with its exercises, ordered by position.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutWithExercises {
    #[serde(flatten)]
    pub workout: workouts::Model,
    pub exercises: Vec<exercises::Model>,
}

impl WorkoutWithExercises {
    pub fn new(workout: workouts::Model, exercises: Vec<exercises::Model>) -> Self {
        Self { workout, exercises }
    }
}
