mod daily_stats;
mod exercise_entry;
mod exercise_type;
mod food_entry;
mod group;
mod meal_type;
mod search;

pub use daily_stats::{DailyStats, DailyTargets, Macro, MacroRatio};
pub use exercise_entry::ExerciseEntry;
pub use exercise_type::ExerciseType;
pub use food_entry::{FoodEntry, MealKey};
pub use group::{MealGroup, TimelineItem, TimelineKind, WorkoutGroup};
pub use meal_type::MealType;
pub use search::{
    FoodListPage, FoodSearchItem, FoodSearchResponse, SearchNutrition, SearchResponseError,
    SimplifiedFoodSearchItem,
};
