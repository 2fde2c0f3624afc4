//! Display groups derived from raw entries.
//!
//! Groups are never stored. They are rebuilt from the entry collections each
//! time the ledger changes and handed back to it for edits.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::exercise_entry::ExerciseEntry;
use super::food_entry::{FoodEntry, MealKey};
use super::meal_type::MealType;

/// Food entries sharing a time label and meal type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealGroup {
    /// Id of the first contributing entry.
    pub id: Uuid,
    pub entries: Vec<FoodEntry>,
    pub time_label: String,
    pub meal_type: MealType,
}

impl MealGroup {
    pub fn key(&self) -> MealKey {
        MealKey::new(self.time_label.clone(), self.meal_type)
    }

    pub fn total_calories(&self) -> f64 {
        self.entries.iter().map(|e| e.calories).sum()
    }

    pub fn total_protein(&self) -> f64 {
        self.entries.iter().map(|e| e.protein).sum()
    }

    pub fn total_carbs(&self) -> f64 {
        self.entries.iter().map(|e| e.carbs).sum()
    }

    pub fn total_fat(&self) -> f64 {
        self.entries.iter().map(|e| e.fat).sum()
    }
}

/// A single exercise entry wrapped for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutGroup {
    pub id: Uuid,
    pub entries: Vec<ExerciseEntry>,
    pub time_label: String,
}

impl WorkoutGroup {
    pub fn single(entry: ExerciseEntry) -> Self {
        Self {
            id: entry.id,
            time_label: entry.time_label.clone(),
            entries: vec![entry],
        }
    }

    pub fn total_calories_burned(&self) -> f64 {
        self.entries.iter().map(|e| e.calories_burned).sum()
    }

    pub fn total_duration(&self) -> u32 {
        self.entries.iter().map(|e| e.duration_minutes).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Meal,
    Workout,
}

/// One row of the day's timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimelineItem {
    Meal(MealGroup),
    Workout(WorkoutGroup),
}

impl TimelineItem {
    pub fn id(&self) -> Uuid {
        match self {
            TimelineItem::Meal(g) => g.id,
            TimelineItem::Workout(g) => g.id,
        }
    }

    pub fn time_label(&self) -> &str {
        match self {
            TimelineItem::Meal(g) => &g.time_label,
            TimelineItem::Workout(g) => &g.time_label,
        }
    }

    pub fn kind(&self) -> TimelineKind {
        match self {
            TimelineItem::Meal(_) => TimelineKind::Meal,
            TimelineItem::Workout(_) => TimelineKind::Workout,
        }
    }

    pub fn as_meal(&self) -> Option<&MealGroup> {
        match self {
            TimelineItem::Meal(g) => Some(g),
            TimelineItem::Workout(_) => None,
        }
    }

    pub fn as_workout(&self) -> Option<&WorkoutGroup> {
        match self {
            TimelineItem::Workout(g) => Some(g),
            TimelineItem::Meal(_) => None,
        }
    }
}

impl fmt::Display for TimelineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineItem::Meal(group) => {
                writeln!(
                    f,
                    "{}  {} ({:.0} kcal)",
                    group.time_label,
                    group.meal_type,
                    group.total_calories()
                )?;
                for entry in &group.entries {
                    writeln!(f, "    - {}", entry)?;
                }
                Ok(())
            }
            TimelineItem::Workout(group) => {
                for entry in &group.entries {
                    writeln!(f, "{}  {}", group.time_label, entry)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseType;

    #[test]
    fn test_meal_group_totals() {
        let group = MealGroup {
            id: Uuid::new_v4(),
            entries: vec![
                FoodEntry::new("Apple", MealType::Breakfast, "08:00")
                    .with_macros(95.0, 0.5, 25.0, 0.3),
                FoodEntry::new("Egg", MealType::Breakfast, "08:00")
                    .with_macros(78.0, 6.0, 0.5, 5.0),
            ],
            time_label: "08:00".into(),
            meal_type: MealType::Breakfast,
        };
        assert_eq!(group.total_calories(), 173.0);
        assert_eq!(group.total_protein(), 6.5);
        assert_eq!(group.key(), MealKey::new("08:00", MealType::Breakfast));
    }

    #[test]
    fn test_workout_single() {
        let entry = ExerciseEntry::new("Swim", ExerciseType::Sports, "19:00").with_burn(400.0, 45);
        let id = entry.id;
        let group = WorkoutGroup::single(entry);
        assert_eq!(group.id, id);
        assert_eq!(group.entries.len(), 1);
        assert_eq!(group.total_duration(), 45);
        assert_eq!(group.total_calories_burned(), 400.0);
    }

    #[test]
    fn test_timeline_item_json_is_tagged() {
        let entry = ExerciseEntry::new("Lift", ExerciseType::Strength, "17:00");
        let item = TimelineItem::Workout(WorkoutGroup::single(entry));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "workout");
        assert_eq!(item.kind(), TimelineKind::Workout);
        assert_eq!(item.time_label(), "17:00");
        assert!(item.as_meal().is_none());
    }
}
