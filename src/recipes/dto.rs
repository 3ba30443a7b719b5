use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub calorie_limit: f64,
}

/// One dish as described by the model. This is the strict schema the raw
/// model output must parse into; anything else is a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub calories: f64,
    pub description: String,
    pub ingredients: Vec<String>,
    pub cooking_time: String,
}

/// Top-level shape the model is asked to return.
#[derive(Debug, Deserialize)]
pub struct DishList {
    pub dishes: Vec<Dish>,
}

/// A dish augmented with a best-effort tutorial video link.
#[derive(Debug, Serialize)]
pub struct RecommendedDish {
    #[serde(flatten)]
    pub dish: Dish,
    pub video_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub recommendations: Vec<RecommendedDish>,
}

#[derive(Debug, Serialize)]
pub struct IngredientsResponse {
    pub ingredients: Vec<&'static str>,
}
