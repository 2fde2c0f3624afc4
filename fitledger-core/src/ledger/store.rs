use uuid::Uuid;

use crate::models::{ExerciseEntry, FoodEntry};

/// Raw entries of the current session, in store order.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    pub food: Vec<FoodEntry>,
    pub exercise: Vec<ExerciseEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn food_by_id(&self, id: Uuid) -> Option<&FoodEntry> {
        self.food.iter().find(|e| e.id == id)
    }

    pub fn exercise_by_id(&self, id: Uuid) -> Option<&ExerciseEntry> {
        self.exercise.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.exercise.is_empty()
    }

    pub(crate) fn food_id_taken(&self, id: Uuid) -> bool {
        self.food.iter().any(|e| e.id == id)
    }

    pub(crate) fn exercise_id_taken(&self, id: Uuid) -> bool {
        self.exercise.iter().any(|e| e.id == id)
    }
}
