//! fitledger core library
//!
//! In-memory daily ledger of food and exercise entries, with the models the
//! surrounding application shares with it.

pub mod ledger;
pub mod models;

pub use ledger::{
    EntryStore, Ledger, LedgerObservers, LedgerSnapshot, MergeOutcome, Observable,
    ObserverHandle, SubscriptionId,
};
pub use models::{
    DailyStats, DailyTargets, ExerciseEntry, ExerciseType, FoodEntry, FoodSearchResponse, Macro,
    MacroRatio, MealGroup, MealKey, MealType, SearchResponseError, TimelineItem, TimelineKind,
    WorkoutGroup,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
