use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad category of a logged exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Cardio,
    Strength,
    Flexibility,
    Sports,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Cardio => "cardio",
            ExerciseType::Strength => "strength",
            ExerciseType::Flexibility => "flexibility",
            ExerciseType::Sports => "sports",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Ok(ExerciseType::Cardio),
            "strength" => Ok(ExerciseType::Strength),
            "flexibility" => Ok(ExerciseType::Flexibility),
            "sports" | "sport" => Ok(ExerciseType::Sports),
            _ => Err(format!(
                "Invalid exercise type '{}'. Valid options: cardio, strength, flexibility, sports",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_type_from_str() {
        assert_eq!(ExerciseType::from_str("Cardio").unwrap(), ExerciseType::Cardio);
        assert_eq!(ExerciseType::from_str("sport").unwrap(), ExerciseType::Sports);
        assert!(ExerciseType::from_str("yoga").is_err());
    }

    #[test]
    fn test_exercise_type_display() {
        assert_eq!(ExerciseType::Flexibility.to_string(), "flexibility");
    }
}
