mod dto;
pub mod gemini;
pub mod handlers;
mod services;
pub mod youtube;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::recipe_routes()
}
