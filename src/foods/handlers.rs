use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, instrument};

use crate::{foods::repo_types::FoodItem, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/foods/search", get(search_foods))
        .route("/foods/:id", get(get_food))
}

#[derive(Debug, Deserialize)]
pub struct FoodSearchQuery {
    pub name: Option<String>,
    pub region: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodItem>>, (StatusCode, String)> {
    let foods = FoodItem::list_all(&state.db).await.map_err(|e| {
        error!(error = %e, "list foods failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
    })?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(q): Query<FoodSearchQuery>,
) -> Result<Json<Vec<FoodItem>>, (StatusCode, String)> {
    // "All" is the client's no-filter sentinel for region.
    let region = q.region.as_deref().filter(|r| *r != "All");
    let name = q.name.as_deref().filter(|n| !n.is_empty());

    let foods = FoodItem::search(&state.db, name, region).await.map_err(|e| {
        error!(error = %e, "food search failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
    })?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FoodItem>, (StatusCode, String)> {
    match FoodItem::find_by_id(&state.db, id).await {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Food not found".into())),
        Err(e) => {
            error!(error = %e, %id, "get food failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()))
        }
    }
}
