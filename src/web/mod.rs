// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::MatcherConfig;
use crate::engine::{AnalysisReport, MatchEngine};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/match", data = "<request>")]
pub async fn match_resume(
    request: Json<StandardRequest<MatchRequest>>,
    config: &State<ServerConfig>,
) -> Json<DataResponse<MatchData>> {
    handlers::match_handler(request, config).await
}

#[post("/skills", data = "<request>")]
pub async fn extract_skills(
    request: Json<StandardRequest<SkillsRequest>>,
    config: &State<ServerConfig>,
) -> Json<DataResponse<SkillsData>> {
    handlers::skills_handler(request, config).await
}

#[post("/suggest", data = "<request>")]
pub async fn suggest_categories(
    request: Json<StandardRequest<SuggestRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<SuggestData>>, ApiError> {
    handlers::suggest_handler(request, config).await
}

#[post("/analyze", data = "<request>")]
pub async fn analyze_resume(
    request: Json<StandardRequest<AnalyzeRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<AnalysisReport>>, ApiError> {
    handlers::analyze_handler(request, config).await
}

#[get("/categories")]
pub async fn get_categories(config: &State<ServerConfig>) -> Json<DataResponse<Vec<CategoryInfo>>> {
    handlers::get_categories_handler(config).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected fields".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec!["Text fields must be JSON strings and limit a non-negative integer".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the API around an already initialized engine
pub fn build_rocket(engine: Arc<MatchEngine>, config: &MatcherConfig) -> Rocket<Build> {
    let server_config = ServerConfig {
        engine,
        suggestion_limit: config.suggestion_limit,
    };

    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .register(
            "/api",
            catchers![bad_request_catcher, unprocessable_catcher, internal_error],
        )
        .mount(
            "/api",
            routes![
                match_resume,
                extract_skills,
                suggest_categories,
                analyze_resume,
                get_categories,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(engine: Arc<MatchEngine>, config: MatcherConfig) -> Result<()> {
    info!("Starting resume matching API server");
    info!("Server: http://0.0.0.0:{}", config.port);
    info!("Taxonomy: {}", config.taxonomy_path.display());

    let _rocket = build_rocket(engine, &config)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
