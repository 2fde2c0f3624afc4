//! Daily activity ledger.
//!
//! Holds the session's food and exercise entries and keeps two derived views
//! in step with them: [`DailyStats`] and the grouped timeline. Every mutation
//! runs the same sequence:
//!
//! 1. mutate the [`EntryStore`]
//! 2. recompute stats from scratch
//! 3. rebuild the timeline from scratch
//! 4. stage all snapshots, then notify observers
//!
//! Observers are only notified after step 4 has staged every view, so none of
//! them sees a half-applied change. The ledger performs no I/O.

mod editor;
mod merge;
mod observable;
mod stats;
mod store;
mod timeline;

use std::sync::Arc;

use tracing::trace;
use uuid::Uuid;

use crate::models::{
    DailyStats, DailyTargets, ExerciseEntry, FoodEntry, MealGroup, TimelineItem, WorkoutGroup,
};

pub use merge::MergeOutcome;
pub use observable::{ObserverHandle, Observable, SubscriptionId};
pub use store::EntryStore;

/// Every published view of the ledger at one instant.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub food_entries: Arc<Vec<FoodEntry>>,
    pub exercise_entries: Arc<Vec<ExerciseEntry>>,
    pub daily_stats: Arc<DailyStats>,
    pub timeline_items: Arc<Vec<TimelineItem>>,
}

#[derive(Debug, Default)]
struct Holders {
    food_entries: Observable<Vec<FoodEntry>>,
    exercise_entries: Observable<Vec<ExerciseEntry>>,
    daily_stats: Observable<DailyStats>,
    timeline_items: Observable<Vec<TimelineItem>>,
    snapshot: Observable<LedgerSnapshot>,
}

/// Observable outputs of the ledger.
///
/// `snapshot` carries all views together and is the one to watch when a
/// consumer on another task needs them mutually consistent.
pub struct LedgerObservers<'a> {
    holders: &'a mut Holders,
}

impl<'a> LedgerObservers<'a> {
    pub fn food_entries(self) -> ObserverHandle<'a, Vec<FoodEntry>> {
        ObserverHandle::new(&mut self.holders.food_entries)
    }

    pub fn exercise_entries(self) -> ObserverHandle<'a, Vec<ExerciseEntry>> {
        ObserverHandle::new(&mut self.holders.exercise_entries)
    }

    pub fn daily_stats(self) -> ObserverHandle<'a, DailyStats> {
        ObserverHandle::new(&mut self.holders.daily_stats)
    }

    pub fn timeline_items(self) -> ObserverHandle<'a, Vec<TimelineItem>> {
        ObserverHandle::new(&mut self.holders.timeline_items)
    }

    pub fn snapshot(self) -> ObserverHandle<'a, LedgerSnapshot> {
        ObserverHandle::new(&mut self.holders.snapshot)
    }
}

#[derive(Debug)]
pub struct Ledger {
    store: EntryStore,
    observers: Holders,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DailyTargets::default())
    }
}

impl Ledger {
    pub fn new(targets: DailyTargets) -> Self {
        let observers = Holders {
            daily_stats: Observable::new(DailyStats::new(targets)),
            ..Holders::default()
        };
        let mut ledger = Self {
            store: EntryStore::new(),
            observers,
        };
        ledger.stage_all();
        ledger
    }

    pub fn observers(&mut self) -> LedgerObservers<'_> {
        LedgerObservers {
            holders: &mut self.observers,
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn food_entries(&self) -> Arc<Vec<FoodEntry>> {
        self.observers.food_entries.get()
    }

    pub fn exercise_entries(&self) -> Arc<Vec<ExerciseEntry>> {
        self.observers.exercise_entries.get()
    }

    pub fn daily_stats(&self) -> Arc<DailyStats> {
        self.observers.daily_stats.get()
    }

    pub fn timeline(&self) -> Arc<Vec<TimelineItem>> {
        self.observers.timeline_items.get()
    }

    pub fn snapshot(&self) -> Arc<LedgerSnapshot> {
        self.observers.snapshot.get()
    }

    /// Looks up a meal group on the current timeline.
    pub fn meal_group(&self, id: Uuid) -> Option<MealGroup> {
        self.timeline()
            .iter()
            .filter_map(TimelineItem::as_meal)
            .find(|g| g.id == id)
            .cloned()
    }

    /// Looks up a workout group on the current timeline.
    pub fn workout_group(&self, id: Uuid) -> Option<WorkoutGroup> {
        self.store
            .exercise_by_id(id)
            .cloned()
            .map(WorkoutGroup::single)
    }

    /// Adds food entries, merging them into matching stored entries.
    pub fn submit_food_entries(&mut self, entries: Vec<FoodEntry>) -> MergeOutcome {
        if entries.is_empty() {
            return MergeOutcome::default();
        }
        let outcome = merge::add_food_entries(&mut self.store, entries);
        self.commit();
        outcome
    }

    /// Adds exercise entries ahead of the existing ones. Never merges.
    pub fn submit_exercise_entries(&mut self, entries: Vec<ExerciseEntry>) -> usize {
        if entries.is_empty() {
            return 0;
        }
        let added = merge::add_exercise_entries(&mut self.store, entries);
        self.commit();
        added
    }

    pub fn update_meal_group(&mut self, group: MealGroup) {
        editor::update_meal_group(&mut self.store, group);
        self.commit();
    }

    pub fn update_workout_group(&mut self, group: WorkoutGroup) {
        editor::update_workout_group(&mut self.store, group);
        self.commit();
    }

    /// Deletes the meal group containing the entry `group_id`.
    ///
    /// Returns false, and publishes nothing, when no entry has that id.
    pub fn delete_meal_group(&mut self, group_id: Uuid) -> bool {
        let removed = editor::delete_meal_group(&mut self.store, group_id);
        if removed {
            self.commit();
        }
        removed
    }

    /// Deletes the workout `group_id`. Returns false when it does not exist.
    pub fn delete_workout_group(&mut self, group_id: Uuid) -> bool {
        let removed = editor::delete_workout_group(&mut self.store, group_id);
        if removed {
            self.commit();
        }
        removed
    }

    /// Replaces all food entries as loaded from elsewhere.
    ///
    /// Entries sharing name, meal type and time are summed into one; nothing
    /// else is merged.
    pub fn replace_food_entries(&mut self, entries: Vec<FoodEntry>) {
        self.store.food = merge::premerge_batch(entries);
        self.commit();
    }

    /// Replaces all exercise entries as loaded from elsewhere. Never merges;
    /// repeated ids are reassigned.
    pub fn replace_exercise_entries(&mut self, entries: Vec<ExerciseEntry>) {
        self.store.exercise = merge::dedup_exercise_ids(entries);
        self.commit();
    }

    /// Sets the daily targets. Current values are left as they are.
    pub fn set_targets(&mut self, targets: DailyTargets) {
        let mut stats = (*self.daily_stats()).clone();
        stats.calories.target = targets.calories;
        stats.protein.target = targets.protein;
        stats.carbs.target = targets.carbs;
        stats.fat.target = targets.fat;
        self.observers.daily_stats.stage(stats);
        self.commit();
    }

    /// Recomputes and republishes without changing any entry.
    pub fn refresh(&mut self) {
        self.commit();
    }

    pub fn clear(&mut self) {
        self.store = EntryStore::new();
        self.commit();
    }

    fn stage_all(&mut self) {
        let stats = stats::recompute(&self.store, &self.observers.daily_stats.get());
        let timeline = timeline::rebuild(&self.store);

        self.observers.food_entries.stage(self.store.food.clone());
        self.observers.exercise_entries.stage(self.store.exercise.clone());
        self.observers.daily_stats.stage(stats);
        self.observers.timeline_items.stage(timeline);

        let snapshot = LedgerSnapshot {
            food_entries: self.observers.food_entries.get(),
            exercise_entries: self.observers.exercise_entries.get(),
            daily_stats: self.observers.daily_stats.get(),
            timeline_items: self.observers.timeline_items.get(),
        };
        self.observers.snapshot.stage_shared(Arc::new(snapshot));
    }

    fn commit(&mut self) {
        self.stage_all();

        let observers = &mut self.observers;
        observers.food_entries.publish();
        observers.exercise_entries.publish();
        observers.daily_stats.publish();
        observers.timeline_items.publish();
        observers.snapshot.publish();

        trace!(
            food = self.store.food.len(),
            exercise = self.store.exercise.len(),
            version = self.observers.snapshot.version(),
            "ledger published"
        );
    }
}
