//! Insertion path for new entries.
//!
//! Food entries are folded into existing ones whenever they describe the same
//! item. Exercise entries are never merged.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use super::store::EntryStore;
use crate::models::{ExerciseEntry, FoodEntry, MealType};

/// What happened to each incoming food entry after batch pre-merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Folded into an entry with the same name, meal type and time.
    pub exact: usize,
    /// Folded into an entry with the same name and meal type; its time was moved.
    pub relaxed: usize,
    /// Stored as new entries.
    pub appended: usize,
}

/// Sums entries of one batch that share name, meal type and time label.
///
/// The first occurrence keeps its position and identity.
pub(crate) fn premerge_batch(entries: Vec<FoodEntry>) -> Vec<FoodEntry> {
    let mut merged: Vec<FoodEntry> = Vec::with_capacity(entries.len());
    let mut index: HashMap<(String, MealType, String), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.name.clone(), entry.meal_type, entry.time_label.clone());
        match index.get(&key) {
            Some(&pos) => merged[pos].absorb(&entry),
            None => {
                index.insert(key, merged.len());
                merged.push(entry);
            }
        }
    }

    merged
}

pub(crate) fn add_food_entries(store: &mut EntryStore, entries: Vec<FoodEntry>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for incoming in premerge_batch(entries) {
        if let Some(pos) = store.food.iter().position(|e| e.same_item(&incoming)) {
            debug!(name = %incoming.name, time = %incoming.time_label, "exact food merge");
            store.food[pos].absorb(&incoming);
            outcome.exact += 1;
        } else if let Some(pos) = store.food.iter().position(|e| e.same_food(&incoming)) {
            let existing = &mut store.food[pos];
            debug!(
                name = %incoming.name,
                from = %existing.time_label,
                to = %incoming.time_label,
                "relaxed food merge"
            );
            existing.absorb(&incoming);
            existing.time_label = incoming.time_label;
            outcome.relaxed += 1;
        } else {
            store.food.push(incoming.with_id(Uuid::new_v4()));
            outcome.appended += 1;
        }
    }

    outcome
}

/// Prepends exercise entries in the order given.
///
/// An entry whose id is already stored gets a fresh id so that workout group
/// ids stay unique.
pub(crate) fn add_exercise_entries(store: &mut EntryStore, entries: Vec<ExerciseEntry>) -> usize {
    let fresh = unique_ids(entries, |id| store.exercise_id_taken(id));
    let added = fresh.len();
    store.exercise.splice(0..0, fresh);
    added
}

/// Reassigns ids repeated within `entries`, keeping the first holder of each.
pub(crate) fn dedup_exercise_ids(entries: Vec<ExerciseEntry>) -> Vec<ExerciseEntry> {
    unique_ids(entries, |_| false)
}

fn unique_ids<F>(entries: Vec<ExerciseEntry>, taken: F) -> Vec<ExerciseEntry>
where
    F: Fn(Uuid) -> bool,
{
    let mut fresh: Vec<ExerciseEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        let clash = taken(entry.id) || fresh.iter().any(|e| e.id == entry.id);
        if clash {
            debug!(id = %entry.id, name = %entry.name, "exercise id already taken, reassigning");
            fresh.push(entry.with_id(Uuid::new_v4()));
        } else {
            fresh.push(entry);
        }
    }

    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseType;

    fn apple(time: &str, calories: f64) -> FoodEntry {
        FoodEntry::new("Apple", MealType::Breakfast, time).with_macros(calories, 0.5, 25.0, 0.3)
    }

    #[test]
    fn test_premerge_batch_sums_duplicates() {
        let merged = premerge_batch(vec![
            apple("08:00", 95.0),
            FoodEntry::new("Egg", MealType::Breakfast, "08:00").with_calories(78.0),
            apple("08:00", 95.0),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Apple");
        assert_eq!(merged[0].calories, 190.0);
        assert_eq!(merged[0].carbs, 50.0);
        assert_eq!(merged[1].name, "Egg");
    }

    #[test]
    fn test_premerge_keeps_different_times_apart() {
        let merged = premerge_batch(vec![apple("08:00", 95.0), apple("08:30", 95.0)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_exact_merge_keeps_id_and_time() {
        let mut store = EntryStore::new();
        add_food_entries(&mut store, vec![apple("08:00", 95.0)]);
        let id = store.food[0].id;

        let outcome = add_food_entries(&mut store, vec![apple("08:00", 50.0)]);

        assert_eq!(outcome.exact, 1);
        assert_eq!(store.food.len(), 1);
        assert_eq!(store.food[0].id, id);
        assert_eq!(store.food[0].time_label, "08:00");
        assert_eq!(store.food[0].calories, 145.0);
    }

    #[test]
    fn test_relaxed_merge_moves_time() {
        let mut store = EntryStore::new();
        add_food_entries(&mut store, vec![apple("08:00", 95.0)]);
        let id = store.food[0].id;

        let outcome = add_food_entries(&mut store, vec![apple("08:30", 95.0)]);

        assert_eq!(outcome.relaxed, 1);
        assert_eq!(store.food.len(), 1);
        assert_eq!(store.food[0].id, id);
        assert_eq!(store.food[0].time_label, "08:30");
        assert_eq!(store.food[0].calories, 190.0);
    }

    #[test]
    fn test_exact_match_preferred_over_relaxed() {
        let mut store = EntryStore::new();
        store.food.push(apple("07:00", 10.0));
        store.food.push(apple("08:00", 20.0));

        add_food_entries(&mut store, vec![apple("08:00", 5.0)]);

        assert_eq!(store.food[0].calories, 10.0);
        assert_eq!(store.food[0].time_label, "07:00");
        assert_eq!(store.food[1].calories, 25.0);
    }

    #[test]
    fn test_different_meal_type_is_appended() {
        let mut store = EntryStore::new();
        add_food_entries(&mut store, vec![apple("08:00", 95.0)]);
        let lunch = FoodEntry::new("Apple", MealType::Lunch, "08:00").with_calories(95.0);

        let outcome = add_food_entries(&mut store, vec![lunch]);

        assert_eq!(outcome.appended, 1);
        assert_eq!(store.food.len(), 2);
    }

    #[test]
    fn test_appended_entry_gets_fresh_id() {
        let mut store = EntryStore::new();
        let entry = apple("08:00", 95.0);
        let original_id = entry.id;

        add_food_entries(&mut store, vec![entry]);

        assert_ne!(store.food[0].id, original_id);
    }

    #[test]
    fn test_same_batch_different_times_collapse_relaxed() {
        let mut store = EntryStore::new();
        let batch = vec![apple("08:00", 95.0), apple("08:30", 95.0)];
        let outcome = add_food_entries(&mut store, batch);

        assert_eq!(outcome.appended, 1);
        assert_eq!(outcome.relaxed, 1);
        assert_eq!(store.food.len(), 1);
        assert_eq!(store.food[0].time_label, "08:30");
    }

    #[test]
    fn test_exercise_entries_are_prepended_without_merging() {
        let mut store = EntryStore::new();
        let first = ExerciseEntry::new("Run", ExerciseType::Cardio, "07:00").with_burn(300.0, 30);
        add_exercise_entries(&mut store, vec![first.clone()]);

        let a = ExerciseEntry::new("Run", ExerciseType::Cardio, "07:00").with_burn(300.0, 30);
        let b = ExerciseEntry::new("Plank", ExerciseType::Strength, "07:40").with_burn(20.0, 5);
        let added = add_exercise_entries(&mut store, vec![a.clone(), b.clone()]);

        assert_eq!(added, 2);
        let ids: Vec<_> = store.exercise.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id, first.id]);
    }

    #[test]
    fn test_exercise_id_clash_is_reassigned() {
        let mut store = EntryStore::new();
        let run = ExerciseEntry::new("Run", ExerciseType::Cardio, "07:00");
        add_exercise_entries(&mut store, vec![run.clone()]);
        add_exercise_entries(&mut store, vec![run.clone()]);

        assert_eq!(store.exercise.len(), 2);
        assert_ne!(store.exercise[0].id, store.exercise[1].id);
        assert_eq!(store.exercise[1].id, run.id);
    }

    #[test]
    fn test_dedup_exercise_ids_keeps_first_holder() {
        let run = ExerciseEntry::new("Run", ExerciseType::Cardio, "07:00");
        let walk = ExerciseEntry::new("Walk", ExerciseType::Cardio, "19:00");

        let entries = dedup_exercise_ids(vec![run.clone(), walk.clone(), run.clone()]);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, run.id);
        assert_eq!(entries[1].id, walk.id);
        assert_ne!(entries[2].id, run.id);
        assert_eq!(entries[2].name, "Run");
    }
}
