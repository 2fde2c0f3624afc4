//! Edit and delete of whole display groups.
//!
//! A group is resolved back to the raw entries it was built from, which are
//! then replaced or removed. Unknown ids are no-ops.

use tracing::debug;
use uuid::Uuid;

use super::merge::premerge_batch;
use super::store::EntryStore;
use crate::models::{ExerciseEntry, FoodEntry, MealGroup, MealKey, WorkoutGroup};

/// Key the stored group currently has. Resolved through the group id first so
/// that a group whose time label was changed in an edit dialog still replaces
/// the entries it came from.
fn stored_key(store: &EntryStore, group: &MealGroup) -> MealKey {
    store
        .food_by_id(group.id)
        .map(FoodEntry::meal_key)
        .unwrap_or_else(|| group.key())
}

/// Replaces every entry of the group with `group.entries`.
///
/// Entries left out of the resubmitted group are dropped. Resubmitted entries
/// that collide with another stored entry on name, meal type and time are
/// folded into it.
pub(crate) fn update_meal_group(store: &mut EntryStore, group: MealGroup) -> usize {
    let key = stored_key(store, &group);
    let before = store.food.len();
    store.food.retain(|e| !e.in_group(&key));
    let removed = before - store.food.len();

    let mut fresh: Vec<FoodEntry> = Vec::new();
    for mut entry in premerge_batch(group.entries) {
        if let Some(pos) = store.food.iter().position(|e| e.same_item(&entry)) {
            store.food[pos].absorb(&entry);
            continue;
        }
        if store.food_id_taken(entry.id) || fresh.iter().any(|e| e.id == entry.id) {
            entry.id = Uuid::new_v4();
        }
        fresh.push(entry);
    }

    debug!(group = %key, removed, inserted = fresh.len(), "meal group replaced");
    let inserted = fresh.len();
    store.food.splice(0..0, fresh);
    inserted
}

/// Replaces the workout's entry with `group.entries`.
pub(crate) fn update_workout_group(store: &mut EntryStore, group: WorkoutGroup) -> usize {
    store.exercise.retain(|e| e.id != group.id);

    let mut fresh: Vec<ExerciseEntry> = Vec::with_capacity(group.entries.len());
    for mut entry in group.entries {
        if store.exercise_id_taken(entry.id) || fresh.iter().any(|e| e.id == entry.id) {
            entry.id = Uuid::new_v4();
        }
        fresh.push(entry);
    }

    debug!(group = %group.id, inserted = fresh.len(), "workout group replaced");
    let inserted = fresh.len();
    store.exercise.splice(0..0, fresh);
    inserted
}

/// Removes every food entry sharing the key of the entry with `group_id`.
pub(crate) fn delete_meal_group(store: &mut EntryStore, group_id: Uuid) -> bool {
    let Some(key) = store.food_by_id(group_id).map(FoodEntry::meal_key) else {
        debug!(%group_id, "delete of unknown meal group ignored");
        return false;
    };

    store.food.retain(|e| !e.in_group(&key));
    debug!(group = %key, "meal group deleted");
    true
}

pub(crate) fn delete_workout_group(store: &mut EntryStore, group_id: Uuid) -> bool {
    let before = store.exercise.len();
    store.exercise.retain(|e| e.id != group_id);
    let removed = before != store.exercise.len();
    if !removed {
        debug!(%group_id, "delete of unknown workout group ignored");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::timeline::rebuild;
    use crate::models::{ExerciseType, MealType};

    fn store_with_breakfast() -> EntryStore {
        let mut store = EntryStore::new();
        for (name, meal_type, time, calories) in [
            ("Apple", MealType::Breakfast, "08:00", 95.0),
            ("Banana", MealType::Breakfast, "08:00", 105.0),
            ("Rice", MealType::Lunch, "12:00", 200.0),
        ] {
            store
                .food
                .push(FoodEntry::new(name, meal_type, time).with_calories(calories));
        }
        store
    }

    fn breakfast_group(store: &EntryStore) -> MealGroup {
        rebuild(store)
            .into_iter()
            .filter_map(|i| i.as_meal().cloned())
            .find(|g| g.meal_type == MealType::Breakfast)
            .unwrap()
    }

    #[test]
    fn test_update_meal_group_drops_omitted_entries() {
        let mut store = store_with_breakfast();
        let mut group = breakfast_group(&store);
        group.entries.retain(|e| e.name == "Banana");
        group.entries[0].calories = 50.0;

        update_meal_group(&mut store, group);

        let names: Vec<_> = store.food.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Banana", "Rice"]);
        assert_eq!(store.food[0].calories, 50.0);
    }

    #[test]
    fn test_update_meal_group_with_new_time_replaces_original() {
        let mut store = store_with_breakfast();
        let mut group = breakfast_group(&store);
        for entry in group.entries.iter_mut() {
            entry.time_label = "08:45".to_string();
        }
        group.time_label = "08:45".to_string();

        update_meal_group(&mut store, group);

        assert_eq!(store.food.len(), 3);
        assert!(store.food.iter().all(|e| e.time_label != "08:00"));
    }

    #[test]
    fn test_update_meal_group_folds_collisions() {
        let mut store = store_with_breakfast();
        let mut group = breakfast_group(&store);
        group.entries.push(FoodEntry::new("Rice", MealType::Lunch, "12:00").with_calories(100.0));

        update_meal_group(&mut store, group);

        let rice: Vec<_> = store.food.iter().filter(|e| e.name == "Rice").collect();
        assert_eq!(rice.len(), 1);
        assert_eq!(rice[0].calories, 300.0);
    }

    #[test]
    fn test_delete_meal_group() {
        let mut store = store_with_breakfast();
        let apple_id = store.food[0].id;

        assert!(delete_meal_group(&mut store, apple_id));
        assert_eq!(store.food.len(), 1);
        assert_eq!(store.food[0].name, "Rice");
    }

    #[test]
    fn test_delete_unknown_meal_group_is_noop() {
        let mut store = store_with_breakfast();
        assert!(!delete_meal_group(&mut store, Uuid::new_v4()));
        assert_eq!(store.food.len(), 3);
    }

    #[test]
    fn test_update_and_delete_workout_group() {
        let mut store = EntryStore::new();
        let run = ExerciseEntry::new("Run", ExerciseType::Cardio, "07:00").with_burn(300.0, 30);
        let swim = ExerciseEntry::new("Swim", ExerciseType::Sports, "18:00").with_burn(400.0, 40);
        store.exercise.push(run.clone());
        store.exercise.push(swim.clone());

        let mut group = WorkoutGroup::single(run.clone());
        group.entries[0].duration_minutes = 45;
        group.entries[0].calories_burned = 450.0;
        assert_eq!(update_workout_group(&mut store, group), 1);

        assert_eq!(store.exercise.len(), 2);
        assert_eq!(store.exercise[0].id, run.id);
        assert_eq!(store.exercise[0].calories_burned, 450.0);

        assert!(delete_workout_group(&mut store, swim.id));
        assert!(!delete_workout_group(&mut store, swim.id));
        assert_eq!(store.exercise.len(), 1);
    }
}
