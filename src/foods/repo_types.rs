use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of the static food catalog. Nutrient values are per serving.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: i32,
    pub name: String,
    pub region: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
}
