//! Builds the display timeline from the raw entries.

use std::collections::HashMap;

use super::store::EntryStore;
use crate::models::{MealGroup, MealKey, TimelineItem, WorkoutGroup};

/// Groups food by `(time_label, meal_type)`, wraps each exercise on its own,
/// and orders everything latest first.
///
/// Ordering compares time labels as strings, which is only meaningful for
/// zero-padded `HH:mm` labels within one day. Equal labels keep discovery
/// order: meal groups in store order, then workouts in store order.
pub(crate) fn rebuild(store: &EntryStore) -> Vec<TimelineItem> {
    let mut meals: Vec<MealGroup> = Vec::new();
    let mut index: HashMap<MealKey, usize> = HashMap::new();

    for entry in &store.food {
        let key = entry.meal_key();
        match index.get(&key) {
            Some(&pos) => meals[pos].entries.push(entry.clone()),
            None => {
                index.insert(key, meals.len());
                meals.push(MealGroup {
                    id: entry.id,
                    entries: vec![entry.clone()],
                    time_label: entry.time_label.clone(),
                    meal_type: entry.meal_type,
                });
            }
        }
    }

    let mut items: Vec<TimelineItem> = meals
        .into_iter()
        .map(TimelineItem::Meal)
        .chain(
            store
                .exercise
                .iter()
                .cloned()
                .map(|e| TimelineItem::Workout(WorkoutGroup::single(e))),
        )
        .collect();

    // sort_by is stable
    items.sort_by(|a, b| b.time_label().cmp(a.time_label()));
    items
}
