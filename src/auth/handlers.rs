use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, CalorieGoalResponse, LoginRequest, Profile, ProfileUpdateRequest,
            ProfileUpdateResponse, PublicUser, RegisterRequest, RegisterResponse,
        },
        goal::daily_calorie_goal,
        repo_types::User,
        services::{hash_password, is_valid_email, verify_password, AuthUser, JwtKeys},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/profile", put(update_profile).get(get_profile))
        .route("/auth/calorie-goal", get(calorie_goal))
}

fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|d| d.code())
        .map(|c| c == "23505")
        .unwrap_or(false)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }

    // Ensure email is not taken
    if let Ok(Some(_)) = User::find_by_email(&state.db, &payload.email).await {
        warn!(email = %payload.email, "email already registered");
        return Err((StatusCode::BAD_REQUEST, "User already exists".into()));
    }

    let hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
        }
    };

    let user = match User::create(&state.db, &payload.username, &payload.email, &hash).await {
        Ok(u) => u,
        // The pre-check races with concurrent registrations; the unique index
        // is the real guard and still maps to the duplicate error.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "duplicate email on insert");
            return Err((StatusCode::BAD_REQUEST, "User already exists".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Registration failed".into()));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user: PublicUser {
                id: user.id,
                username: user.username,
                email: user.email,
            },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password answer identically.
    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
        }
    };

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = match keys.sign(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileUpdateResponse>, (StatusCode, String)> {
    let (gender, height, weight, age, activity_level) = match (
        payload.gender,
        payload.height,
        payload.weight,
        payload.age,
        payload.activity_level,
    ) {
        (Some(g), Some(h), Some(w), Some(a), Some(al)) => (g, h, w, a, al),
        _ => {
            warn!(user_id = %user_id, "profile update with missing fields");
            return Err((StatusCode::BAD_REQUEST, "All fields are required".into()));
        }
    };

    let goal = daily_calorie_goal(weight, height, age, &gender, &activity_level);

    let user = match User::update_profile(
        &state.db, user_id, &gender, height, weight, age, &activity_level, goal,
    )
    .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, user_id = %user_id, "profile update failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update profile".into(),
            ));
        }
    };

    info!(user_id = %user.id, daily_calorie_goal = goal, "profile updated");
    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated successfully".into(),
        profile: Profile {
            gender: user.gender,
            height: user.height_cm,
            weight: user.weight_kg,
            age: user.age,
            activity_level: user.activity_level,
            daily_calorie_goal: user.daily_calorie_goal,
        },
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let user = match User::find_by_id(&state.db, user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %user_id, "profile for unknown user");
            return Err((StatusCode::NOT_FOUND, "User not found".into()));
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_by_id failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
        }
    };

    Ok(Json(Profile {
        gender: user.gender,
        height: user.height_cm,
        weight: user.weight_kg,
        age: user.age,
        activity_level: user.activity_level,
        daily_calorie_goal: user.daily_calorie_goal,
    }))
}

#[instrument(skip(state))]
pub async fn calorie_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CalorieGoalResponse>, (StatusCode, String)> {
    let user = match User::find_by_id(&state.db, user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %user_id, "calorie goal for unknown user");
            return Err((StatusCode::NOT_FOUND, "User not found".into()));
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_by_id failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".into()));
        }
    };

    Ok(Json(CalorieGoalResponse {
        daily_calorie_goal: user.daily_calorie_goal.unwrap_or(2000),
    }))
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn public_user_hides_nothing_it_should_expose() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "tester".into(),
            email: "test@example.com".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("tester"));
    }

    #[test]
    fn unset_goal_defaults_to_2000() {
        let goal: Option<i32> = None;
        let body = CalorieGoalResponse {
            daily_calorie_goal: goal.unwrap_or(2000),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["daily_calorie_goal"], 2000);
    }
}
