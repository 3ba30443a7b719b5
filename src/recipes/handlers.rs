use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::services::AuthUser,
    recipes::{
        dto::{IngredientsResponse, RecommendRequest, RecommendationResponse},
        services::{recommend, RecipeError},
    },
    state::AppState,
};

/// Pantry staples offered to the client as ingredient suggestions.
const COMMON_INGREDIENTS: &[&str] = &[
    "Rice", "Wheat Flour", "Lentils", "Chickpeas", "Tomatoes", "Onions",
    "Garlic", "Ginger", "Turmeric", "Chili Powder", "Cumin Seeds",
    "Mustard Seeds", "Curry Leaves", "Coriander", "Spinach", "Potatoes",
    "Eggs", "Paneer", "Yogurt", "Oil", "Salt", "Pepper",
];

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/recommendations", post(recommendations))
        .route("/recipes/user-ingredients", get(user_ingredients))
}

#[instrument(skip(state, payload))]
pub async fn recommendations(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<RecommendationResponse>, (StatusCode, String)> {
    let dishes = recommend(
        state.model.as_ref(),
        state.videos.as_ref(),
        &payload.ingredients,
        payload.calorie_limit,
    )
    .await
    .map_err(|e| match e {
        RecipeError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        RecipeError::Parse(_) | RecipeError::Upstream(_) => {
            error!(error = %e, user_id = %user_id, "recommendation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate recommendations".to_string(),
            )
        }
    })?;

    info!(user_id = %user_id, dishes = dishes.len(), "recommendations generated");
    Ok(Json(RecommendationResponse {
        success: true,
        recommendations: dishes,
    }))
}

#[instrument]
pub async fn user_ingredients(
    AuthUser(_user_id): AuthUser,
) -> Json<IngredientsResponse> {
    Json(IngredientsResponse {
        ingredients: COMMON_INGREDIENTS.to_vec(),
    })
}
