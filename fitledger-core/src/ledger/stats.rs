use super::store::EntryStore;
use crate::models::DailyStats;

/// Full resum of the store. Targets and units are carried over from `previous`.
pub(crate) fn recompute(store: &EntryStore, previous: &DailyStats) -> DailyStats {
    let mut stats = previous.clone();

    stats.calories.current = store.food.iter().map(|e| e.calories).sum();
    stats.protein.current = store.food.iter().map(|e| e.protein).sum();
    stats.carbs.current = store.food.iter().map(|e| e.carbs).sum();
    stats.fat.current = store.food.iter().map(|e| e.fat).sum();
    stats.calories_burned = store.exercise.iter().map(|e| e.calories_burned).sum();

    stats
}
