use sqlx::FromRow;
use time::{Date, Time};
use uuid::Uuid;

/// Meal log row joined with the food catalog.
#[derive(Debug, Clone, FromRow)]
pub struct MealLogRow {
    pub id: Uuid,
    pub food_id: i32,
    pub meal_type: String,
    pub quantity: f64,
    pub log_date: Date,
    pub log_time: Time,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
}
