use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of meal slots a log entry can be tagged with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    pub food_id: i32,
    pub meal_type: MealType,
    pub quantity: f64,
}

#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub message: String,
    pub log_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: String, // YYYY-MM-DD
}

/// One meal log joined with the referenced food's nutrient data.
#[derive(Debug, Serialize)]
pub struct MealLogEntry {
    pub id: Uuid,
    pub food_id: i32,
    pub meal_type: String,
    pub quantity: f64,
    pub log_date: String,
    pub log_time: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// Quantity-weighted nutrient totals for one calendar day. All fields are
/// null when the day has no logs.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct DailySummary {
    pub total_calories: Option<f64>,
    pub total_protein: Option<f64>,
    pub total_carbs: Option<f64>,
    pub total_fat: Option<f64>,
    pub total_fiber: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
