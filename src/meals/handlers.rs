use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    foods::repo_types::FoodItem,
    meals::{
        dto::{DailySummary, DateQuery, DeleteResponse, LogMealRequest, LogMealResponse,
              MealLogEntry},
        repo,
        services::{fmt_date, fmt_time, parse_date, summarize},
    },
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals/log", post(log_meal))
        .route("/meals/logs", get(list_logs))
        .route("/meals/summary", get(daily_summary))
        .route("/meals/logs/:id", delete(delete_log))
}

#[instrument(skip(state))]
pub async fn log_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<LogMealResponse>), (StatusCode, String)> {
    if payload.quantity <= 0.0 || !payload.quantity.is_finite() {
        warn!(user_id = %user_id, quantity = payload.quantity, "invalid quantity");
        return Err((StatusCode::BAD_REQUEST, "Quantity must be positive".into()));
    }

    // Dangling food references are rejected up front instead of surfacing as
    // a foreign-key violation.
    match FoodItem::find_by_id(&state.db, payload.food_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!(user_id = %user_id, food_id = payload.food_id, "log for unknown food");
            return Err((StatusCode::NOT_FOUND, "Food not found".into()));
        }
        Err(e) => {
            error!(error = %e, "food lookup failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to log meal".into()));
        }
    }

    let now = OffsetDateTime::now_utc();
    let log_id = repo::insert_log(
        &state.db,
        user_id,
        payload.food_id,
        payload.meal_type.as_str(),
        payload.quantity,
        now.date(),
        now.time(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "insert meal log failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to log meal".to_string())
    })?;

    info!(user_id = %user_id, %log_id, food_id = payload.food_id, "meal logged");
    Ok((
        StatusCode::CREATED,
        Json(LogMealResponse {
            message: "Meal logged successfully".into(),
            log_id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<MealLogEntry>>, (StatusCode, String)> {
    let date = parse_date(&q.date)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid date".to_string()))?;

    let rows = repo::list_for_date(&state.db, user_id, date)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "list meal logs failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?;

    let entries = rows
        .into_iter()
        .map(|r| MealLogEntry {
            id: r.id,
            food_id: r.food_id,
            meal_type: r.meal_type,
            quantity: r.quantity,
            log_date: fmt_date(r.log_date),
            log_time: fmt_time(r.log_time),
            name: r.name,
            calories: r.calories,
            protein: r.protein,
            carbohydrates: r.carbohydrates,
            fat: r.fat,
            fiber: r.fiber,
        })
        .collect();
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<DailySummary>, (StatusCode, String)> {
    let date = parse_date(&q.date)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid date".to_string()))?;

    let rows = repo::list_for_date(&state.db, user_id, date)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "summary query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?;

    Ok(Json(summarize(&rows)))
}

#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, (StatusCode, String)> {
    let deleted = repo::delete_log(&state.db, user_id, id).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, %id, "delete meal log failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to delete meal log".to_string(),
        )
    })?;

    if !deleted {
        // Absent and foreign-owned logs are indistinguishable to the caller.
        return Err((StatusCode::NOT_FOUND, "Meal log not found".into()));
    }

    info!(user_id = %user_id, %id, "meal log deleted");
    Ok(Json(DeleteResponse {
        message: "Meal log deleted successfully".into(),
    }))
}
