use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy per gram used for the macro split.
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Progress of one nutrition figure against its daily target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Macro {
    pub current: f64,
    pub target: f64,
    pub unit: String,
}

impl Macro {
    pub fn new(target: f64, unit: impl Into<String>) -> Self {
        Self {
            current: 0.0,
            target,
            unit: unit.into(),
        }
    }

    /// Amount left before the target is reached. Negative once exceeded.
    pub fn remaining(&self) -> f64 {
        self.target - self.current
    }

    /// Fraction of the target consumed, 0.0 when there is no target.
    pub fn progress(&self) -> f64 {
        if self.target > 0.0 {
            self.current / self.target
        } else {
            0.0
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} / {:.0} {}", self.current, self.target, self.unit)
    }
}

/// Externally supplied daily goals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DailyTargets {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for DailyTargets {
    fn default() -> Self {
        Self {
            calories: 2200.0,
            protein: 150.0,
            carbs: 250.0,
            fat: 70.0,
        }
    }
}

/// Daily nutrition and burn totals.
///
/// Only the `current` fields and `calories_burned` are derived from entries;
/// targets are whatever the owner last supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStats {
    pub calories: Macro,
    pub protein: Macro,
    pub carbs: Macro,
    pub fat: Macro,
    pub calories_burned: f64,
}

impl DailyStats {
    pub fn new(targets: DailyTargets) -> Self {
        Self {
            calories: Macro::new(targets.calories, "kcal"),
            protein: Macro::new(targets.protein, "g"),
            carbs: Macro::new(targets.carbs, "g"),
            fat: Macro::new(targets.fat, "g"),
            calories_burned: 0.0,
        }
    }

    pub fn targets(&self) -> DailyTargets {
        DailyTargets {
            calories: self.calories.target,
            protein: self.protein.target,
            carbs: self.carbs.target,
            fat: self.fat.target,
        }
    }

    /// Calories eaten minus calories burned.
    pub fn net_calories(&self) -> f64 {
        self.calories.current - self.calories_burned
    }

    pub fn macro_ratio(&self) -> MacroRatio {
        MacroRatio::from_grams(
            self.protein.current,
            self.carbs.current,
            self.fat.current,
            self.calories.current,
        )
    }
}

impl Default for DailyStats {
    fn default() -> Self {
        Self::new(DailyTargets::default())
    }
}

impl fmt::Display for DailyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calories: {}", self.calories)?;
        writeln!(f, "Protein:  {}", self.protein)?;
        writeln!(f, "Carbs:    {}", self.carbs)?;
        writeln!(f, "Fat:      {}", self.fat)?;
        write!(
            f,
            "Burned:   {:.1} kcal (net {:.1} kcal)",
            self.calories_burned,
            self.net_calories()
        )
    }
}

/// Share of macro energy coming from protein, carbs and fat, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MacroRatio {
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
    pub total_calories: f64,
}

impl MacroRatio {
    pub fn from_grams(protein: f64, carbs: f64, fat: f64, total_calories: f64) -> Self {
        let protein_kcal = protein * KCAL_PER_G_PROTEIN;
        let carbs_kcal = carbs * KCAL_PER_G_CARBS;
        let fat_kcal = fat * KCAL_PER_G_FAT;
        let macro_kcal = protein_kcal + carbs_kcal + fat_kcal;

        if macro_kcal <= 0.0 {
            return Self {
                total_calories,
                ..Self::default()
            };
        }

        Self {
            protein_percent: protein_kcal / macro_kcal * 100.0,
            carbs_percent: carbs_kcal / macro_kcal * 100.0,
            fat_percent: fat_kcal / macro_kcal * 100.0,
            total_calories,
        }
    }
}
