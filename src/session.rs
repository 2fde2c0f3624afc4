//! Session scripts replayed against a ledger.
//!
//! A script is a YAML document listing ledger operations in order:
//!
//! ```yaml
//! targets:
//!   calories: 2000
//! steps:
//!   - op: submit_food
//!     entries:
//!       - { name: Apple, meal_type: breakfast, time: "08:00", calories: 95 }
//!   - op: delete_meal_group
//!     time: "08:00"
//!     meal_type: breakfast
//! ```
//!
//! Groups are addressed by what the user sees (time and meal type, or the
//! workout's name and time) since entry ids only exist once the ledger has
//! assigned them.

use fitledger_core::{DailyTargets, ExerciseEntry, ExerciseType, FoodEntry, MealType};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to read session script '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session script '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Step {step}: invalid time '{time}', expected zero-padded HH:mm")]
    InvalidTime { step: usize, time: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodSpec {
    pub name: String,
    pub meal_type: MealType,
    pub time: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl FoodSpec {
    pub fn to_entry(&self) -> FoodEntry {
        let entry = FoodEntry::new(&self.name, self.meal_type, &self.time).with_macros(
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
        );
        match &self.image {
            Some(image) => entry.with_image(image),
            None => entry,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub time: String,
    #[serde(default)]
    pub calories_burned: f64,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl ExerciseSpec {
    pub fn to_entry(&self) -> ExerciseEntry {
        let entry = ExerciseEntry::new(&self.name, self.exercise_type, &self.time)
            .with_burn(self.calories_burned, self.duration_minutes);
        match &self.image {
            Some(image) => entry.with_image(image),
            None => entry,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SubmitFood {
        entries: Vec<FoodSpec>,
    },
    SubmitExercise {
        entries: Vec<ExerciseSpec>,
    },
    UpdateMealGroup {
        time: String,
        meal_type: MealType,
        entries: Vec<FoodSpec>,
    },
    UpdateWorkout {
        name: String,
        time: String,
        entry: ExerciseSpec,
    },
    DeleteMealGroup {
        time: String,
        meal_type: MealType,
    },
    DeleteWorkout {
        name: String,
        time: String,
    },
    SetTargets {
        targets: DailyTargets,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::SubmitFood { .. } => "submit_food",
            Step::SubmitExercise { .. } => "submit_exercise",
            Step::UpdateMealGroup { .. } => "update_meal_group",
            Step::UpdateWorkout { .. } => "update_workout",
            Step::DeleteMealGroup { .. } => "delete_meal_group",
            Step::DeleteWorkout { .. } => "delete_workout",
            Step::SetTargets { .. } => "set_targets",
        }
    }

    fn time_labels(&self) -> Vec<&str> {
        match self {
            Step::SubmitFood { entries } => entries.iter().map(|e| e.time.as_str()).collect(),
            Step::SubmitExercise { entries } => entries.iter().map(|e| e.time.as_str()).collect(),
            Step::UpdateMealGroup { time, entries, .. } => std::iter::once(time.as_str())
                .chain(entries.iter().map(|e| e.time.as_str()))
                .collect(),
            Step::UpdateWorkout { time, entry, .. } => vec![time.as_str(), entry.time.as_str()],
            Step::DeleteMealGroup { time, .. } | Step::DeleteWorkout { time, .. } => {
                vec![time.as_str()]
            }
            Step::SetTargets { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub targets: Option<DailyTargets>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl SessionScript {
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script: SessionScript =
            serde_yaml::from_str(&contents).map_err(|source| SessionError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        script.validate()?;
        Ok(script)
    }

    /// Timeline ordering compares labels as strings, so only `HH:mm` is accepted.
    pub fn validate(&self) -> Result<(), SessionError> {
        for (i, step) in self.steps.iter().enumerate() {
            if let Some(bad) = step.time_labels().into_iter().find(|t| !is_time_label(t)) {
                return Err(SessionError::InvalidTime {
                    step: i + 1,
                    time: bad.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn is_time_label(label: &str) -> bool {
    let Some((hours, minutes)) = label.split_once(':') else {
        return false;
    };
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return false;
    }
    matches!((hours.parse::<u8>(), minutes.parse::<u8>()), (Ok(h), Ok(m)) if h < 24 && m < 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SCRIPT: &str = r#"
targets:
  calories: 2000
steps:
  - op: submit_food
    entries:
      - { name: Apple, meal_type: breakfast, time: "08:00", calories: 95 }
      - { name: Apple, meal_type: breakfast, time: "08:00", calories: 95 }
  - op: submit_exercise
    entries:
      - { name: Run, type: cardio, time: "07:00", calories_burned: 300, duration_minutes: 30 }
  - op: delete_workout
    name: Run
    time: "07:00"
"#;

    #[test]
    fn test_load_script() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("day.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let script = SessionScript::load(&path).unwrap();
        assert_eq!(script.targets.unwrap().calories, 2000.0);
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[1].name(), "submit_exercise");
        match &script.steps[0] {
            Step::SubmitFood { entries } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].to_entry().calories, 95.0);
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = SessionScript::load(&temp_dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, SessionError::Read { .. }));
    }

    #[test]
    fn test_unknown_op_is_parse_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        std::fs::write(&path, "steps:\n  - op: teleport\n").unwrap();

        let err = SessionScript::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse session script"));
    }

    #[test]
    fn test_invalid_time_rejected() {
        let script: SessionScript = serde_yaml::from_str(
            "steps:\n  - op: delete_meal_group\n    time: \"8:00\"\n    meal_type: lunch\n",
        )
        .unwrap();

        let err = script.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Step 1: invalid time '8:00', expected zero-padded HH:mm"
        );
    }

    #[test]
    fn test_is_time_label() {
        assert!(is_time_label("00:00"));
        assert!(is_time_label("23:59"));
        assert!(!is_time_label("24:00"));
        assert!(!is_time_label("12:60"));
        assert!(!is_time_label("1200"));
        assert!(!is_time_label("ab:cd"));
    }
}
