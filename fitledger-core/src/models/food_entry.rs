use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::meal_type::MealType;

/// A single logged food item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub time_label: String,
    pub meal_type: MealType,
    pub image_ref: Option<String>,
}

/// Identity of the meal group a food entry belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MealKey {
    pub time_label: String,
    pub meal_type: MealType,
}

impl MealKey {
    pub fn new(time_label: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            time_label: time_label.into(),
            meal_type,
        }
    }
}

impl fmt::Display for MealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.meal_type, self.time_label)
    }
}

impl FoodEntry {
    pub fn new(
        name: impl Into<String>,
        meal_type: MealType,
        time_label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            time_label: time_label.into(),
            meal_type,
            image_ref: None,
        }
    }

    /// Sets nutrition values. Negative (or NaN) inputs are stored as zero.
    pub fn with_macros(mut self, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        self.calories = calories.max(0.0);
        self.protein = protein.max(0.0);
        self.carbs = carbs.max(0.0);
        self.fat = fat.max(0.0);
        self
    }

    pub fn with_calories(mut self, calories: f64) -> Self {
        self.calories = calories.max(0.0);
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

    pub fn meal_key(&self) -> MealKey {
        MealKey::new(self.time_label.clone(), self.meal_type)
    }

    pub fn in_group(&self, key: &MealKey) -> bool {
        self.meal_type == key.meal_type && self.time_label == key.time_label
    }

    /// Same name, meal slot and time: the exact merge rule.
    pub fn same_item(&self, other: &FoodEntry) -> bool {
        self.same_food(other) && self.time_label == other.time_label
    }

    /// Same name and meal slot, ignoring time: the relaxed merge rule.
    pub fn same_food(&self, other: &FoodEntry) -> bool {
        self.name == other.name && self.meal_type == other.meal_type
    }

    /// Adds another entry's nutrition into this one. Identity fields are kept.
    pub fn absorb(&mut self, other: &FoodEntry) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }
}

impl fmt::Display for FoodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} kcal, P {}g / C {}g / F {}g)",
            self.name, self.calories, self.protein, self.carbs, self.fat
        )
    }
}
