use crate::state::AppState;
use axum::Router;

mod dto;
pub mod goal;
pub mod handlers;
pub mod repo;
pub(crate) mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
