// src/web/handlers/system_handlers.rs
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn get_categories_handler(
    config: &State<ServerConfig>,
) -> Json<DataResponse<Vec<CategoryInfo>>> {
    let categories: Vec<CategoryInfo> = config
        .engine
        .taxonomy()
        .iter()
        .map(|category| CategoryInfo {
            name: category.name.clone(),
            skills: category.required_skills.clone(),
        })
        .collect();

    let message = if categories.is_empty() {
        "No job categories loaded; suggestions are unavailable".to_string()
    } else {
        format!("{} job categories", categories.len())
    };

    Json(DataResponse::success(message, categories, None))
}

pub async fn health_handler() -> Json<&'static str> {
    info!("Health check");
    Json("OK")
}
