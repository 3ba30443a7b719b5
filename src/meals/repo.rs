use crate::meals::repo_types::MealLogRow;
use sqlx::PgPool;
use time::{Date, Time};
use uuid::Uuid;

/// Insert one log entry stamped with the given date and time.
pub async fn insert_log(
    db: &PgPool,
    user_id: Uuid,
    food_id: i32,
    meal_type: &str,
    quantity: f64,
    log_date: Date,
    log_time: Time,
) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO meal_logs (user_id, food_id, meal_type, quantity, log_date, log_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(food_id)
    .bind(meal_type)
    .bind(quantity)
    .bind(log_date)
    .bind(log_time)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// The caller's logs for one calendar date, newest time first, joined with
/// the food's per-serving nutrients.
pub async fn list_for_date(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Vec<MealLogRow>> {
    let rows = sqlx::query_as::<_, MealLogRow>(
        r#"
        SELECT ml.id, ml.food_id, ml.meal_type, ml.quantity, ml.log_date, ml.log_time,
               fi.name, fi.calories, fi.protein, fi.carbohydrates, fi.fat, fi.fiber
        FROM meal_logs ml
        JOIN food_items fi ON ml.food_id = fi.id
        WHERE ml.user_id = $1 AND ml.log_date = $2
        ORDER BY ml.log_time DESC
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Owner-scoped delete; returns false when the log is absent or owned by
/// someone else.
pub async fn delete_log(db: &PgPool, user_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM meal_logs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(log_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
