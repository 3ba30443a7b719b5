use crate::auth::repo_types::User;
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, gender, height_cm, weight_kg,
                   age, activity_level, daily_calorie_goal, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, gender, height_cm, weight_kg,
                   age, activity_level, daily_calorie_goal, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, gender, height_cm, weight_kg,
                      age, activity_level, daily_calorie_goal, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Store body metrics and the recomputed daily calorie goal.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        gender: &str,
        height_cm: f64,
        weight_kg: f64,
        age: i32,
        activity_level: &str,
        daily_calorie_goal: i32,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET gender = $1, height_cm = $2, weight_kg = $3, age = $4,
                activity_level = $5, daily_calorie_goal = $6
            WHERE id = $7
            RETURNING id, username, email, password_hash, gender, height_cm, weight_kg,
                      age, activity_level, daily_calorie_goal, created_at
            "#,
        )
        .bind(gender)
        .bind(height_cm)
        .bind(weight_kg)
        .bind(age)
        .bind(activity_level)
        .bind(daily_calorie_goal)
        .bind(id)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
