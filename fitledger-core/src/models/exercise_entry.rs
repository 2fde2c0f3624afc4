use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::exercise_type::ExerciseType;

/// A single logged exercise session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub name: String,
    pub calories_burned: f64,
    pub duration_minutes: u32,
    pub time_label: String,
    pub exercise_type: ExerciseType,
    pub image_ref: Option<String>,
}

impl ExerciseEntry {
    pub fn new(
        name: impl Into<String>,
        exercise_type: ExerciseType,
        time_label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories_burned: 0.0,
            duration_minutes: 0,
            time_label: time_label.into(),
            exercise_type,
            image_ref: None,
        }
    }

    pub fn with_burn(mut self, calories_burned: f64, duration_minutes: u32) -> Self {
        self.calories_burned = calories_burned.max(0.0);
        self.duration_minutes = duration_minutes;
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

impl fmt::Display for ExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} min, {} kcal",
            self.name, self.exercise_type, self.duration_minutes, self.calories_burned
        )
    }
}
