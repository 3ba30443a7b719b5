use crate::foods::repo_types::FoodItem;
use sqlx::PgPool;

impl FoodItem {
    /// All catalog entries, sorted by name.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, name, region, calories, protein, carbohydrates, fat, fiber
            FROM food_items
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Filter by optional case-insensitive name substring and exact region.
    pub async fn search(
        db: &PgPool,
        name: Option<&str>,
        region: Option<&str>,
    ) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, name, region, calories, protein, carbohydrates, fat, fiber
            FROM food_items
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR region = $2)
            ORDER BY name
            "#,
        )
        .bind(name)
        .bind(region)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<FoodItem>> {
        let item = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, name, region, calories, protein, carbohydrates, fat, fiber
            FROM food_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }
}
