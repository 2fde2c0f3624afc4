//! Food search responses.
//!
//! The search endpoint answers with one of two payload shapes depending on
//! the `simplified` flag of the request. The caller decodes with the same
//! flag it sent, so the shape is never guessed from the payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::food_entry::FoodEntry;
use super::meal_type::MealType;

#[derive(Error, Debug)]
pub enum SearchResponseError {
    #[error("Invalid {shape} search response: {source}")]
    Decode {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Food '{0}' has no reference weight")]
    ZeroWeight(String),
}

/// Nutrition facts as reported per reference weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
}

impl SearchNutrition {
    fn scaled_entry(
        &self,
        name: &str,
        weight: f64,
        grams: f64,
        meal_type: MealType,
        time_label: &str,
    ) -> Result<FoodEntry, SearchResponseError> {
        if weight <= 0.0 {
            return Err(SearchResponseError::ZeroWeight(name.to_string()));
        }
        let factor = grams / weight;
        Ok(FoodEntry::new(name, meal_type, time_label).with_macros(
            self.calories * factor,
            self.protein * factor,
            self.carbohydrates * factor,
            self.fat * factor,
        ))
    }
}

/// Item of the full search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodSearchItem {
    pub source: String,
    pub food_id: Option<String>,
    pub code: String,
    pub name: String,
    pub weight: f64,
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    pub calory: f64,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub nutrition_per_serving: SearchNutrition,
}

/// Item of the simplified search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifiedFoodSearchItem {
    pub source: String,
    pub food_id: Option<String>,
    pub code: String,
    pub name: String,
    pub weight: f64,
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub nutrition: SearchNutrition,
}

fn default_weight_unit() -> String {
    "g".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodListPage<T> {
    pub page: u32,
    pub total_pages: u32,
    pub foods: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FoodSearchResponse {
    Full(FoodListPage<FoodSearchItem>),
    Simplified(FoodListPage<SimplifiedFoodSearchItem>),
}

impl FoodSearchResponse {
    /// Decodes a response body using the `simplified` flag that was sent.
    pub fn from_json(body: &str, simplified: bool) -> Result<Self, SearchResponseError> {
        if simplified {
            serde_json::from_str(body)
                .map(FoodSearchResponse::Simplified)
                .map_err(|source| SearchResponseError::Decode {
                    shape: "simplified",
                    source,
                })
        } else {
            serde_json::from_str(body)
                .map(FoodSearchResponse::Full)
                .map_err(|source| SearchResponseError::Decode {
                    shape: "full",
                    source,
                })
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            FoodSearchResponse::Full(p) => p.page,
            FoodSearchResponse::Simplified(p) => p.page,
        }
    }

    pub fn total_pages(&self) -> u32 {
        match self {
            FoodSearchResponse::Full(p) => p.total_pages,
            FoodSearchResponse::Simplified(p) => p.total_pages,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            FoodSearchResponse::Full(p) => p.foods.iter().map(|f| f.name.as_str()).collect(),
            FoodSearchResponse::Simplified(p) => {
                p.foods.iter().map(|f| f.name.as_str()).collect()
            }
        }
    }
}

impl FoodSearchItem {
    /// Builds an entry for `grams` of this food.
    pub fn to_food_entry(
        &self,
        grams: f64,
        meal_type: MealType,
        time_label: &str,
    ) -> Result<FoodEntry, SearchResponseError> {
        let entry = self.nutrition_per_serving.scaled_entry(
            &self.name,
            self.weight,
            grams,
            meal_type,
            time_label,
        )?;
        Ok(match &self.image_url {
            Some(url) => entry.with_image(url.clone()),
            None => entry,
        })
    }
}

impl SimplifiedFoodSearchItem {
    /// Builds an entry for `grams` of this food.
    pub fn to_food_entry(
        &self,
        grams: f64,
        meal_type: MealType,
        time_label: &str,
    ) -> Result<FoodEntry, SearchResponseError> {
        let entry =
            self.nutrition
                .scaled_entry(&self.name, self.weight, grams, meal_type, time_label)?;
        Ok(match &self.image_url {
            Some(url) => entry.with_image(url.clone()),
            None => entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLIFIED: &str = r#"{
        "page": 1,
        "total_pages": 3,
        "foods": [{
            "source": "local",
            "food_id": "f-1",
            "code": "apple",
            "name": "Apple",
            "weight": 100,
            "nutrition": {"calories": 52, "protein": 0.3, "fat": 0.2, "carbohydrates": 14}
        }]
    }"#;

    const FULL: &str = r#"{
        "page": 2,
        "total_pages": 2,
        "foods": [{
            "source": "boohee",
            "code": "rice",
            "name": "Rice",
            "weight": 100,
            "weight_unit": "g",
            "calory": 116,
            "nutrition_per_serving": {
                "calories": 116, "protein": 2.6, "carbohydrates": 25.9, "fat": 0.3
            }
        }]
    }"#;

    #[test]
    fn test_decode_simplified() {
        let resp = FoodSearchResponse::from_json(SIMPLIFIED, true).unwrap();
        assert!(matches!(resp, FoodSearchResponse::Simplified(_)));
        assert_eq!(resp.total_pages(), 3);
        assert_eq!(resp.names(), vec!["Apple"]);
    }

    #[test]
    fn test_decode_full() {
        let resp = FoodSearchResponse::from_json(FULL, false).unwrap();
        assert!(matches!(resp, FoodSearchResponse::Full(_)));
        assert_eq!(resp.page(), 2);
    }

    #[test]
    fn test_decode_with_wrong_flag_fails() {
        let err = FoodSearchResponse::from_json(SIMPLIFIED, false).unwrap_err();
        assert!(err.to_string().contains("full search response"));
    }

    #[test]
    fn test_to_food_entry_scales_by_weight() {
        let resp = FoodSearchResponse::from_json(SIMPLIFIED, true).unwrap();
        let FoodSearchResponse::Simplified(page) = resp else {
            panic!("expected simplified response");
        };
        let entry = page.foods[0]
            .to_food_entry(200.0, MealType::Snack, "15:00")
            .unwrap();
        assert_eq!(entry.name, "Apple");
        assert_eq!(entry.calories, 104.0);
        assert_eq!(entry.carbs, 28.0);
        assert_eq!(entry.meal_type, MealType::Snack);
    }

    #[test]
    fn test_to_food_entry_zero_weight() {
        let mut item: FoodListPage<FoodSearchItem> = serde_json::from_str(FULL).unwrap();
        item.foods[0].weight = 0.0;
        let err = item.foods[0]
            .to_food_entry(100.0, MealType::Lunch, "12:00")
            .unwrap_err();
        assert!(matches!(err, SearchResponseError::ZeroWeight(_)));
    }
}
