// src/web/handlers/analysis_handlers.rs

use crate::engine::AnalysisReport;
use crate::web::types::{
    bad_request, AnalyzeRequest, ApiError, DataResponse, MatchData, MatchRequest, ServerConfig,
    SkillsData, SkillsRequest, StandardRequest, SuggestData, SuggestRequest, WithConversationId,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

fn resolve_limit(
    requested: Option<usize>,
    config: &ServerConfig,
    conversation_id: Option<String>,
) -> Result<usize, ApiError> {
    match requested {
        Some(0) => {
            warn!("Rejected suggestion limit of 0");
            Err(bad_request(
                "Suggestion limit must be at least 1",
                "INVALID_LIMIT",
                &["Omit limit to use the server default"],
                conversation_id,
            ))
        }
        Some(limit) => Ok(limit),
        None => Ok(config.suggestion_limit),
    }
}

pub async fn match_handler(
    request: Json<StandardRequest<MatchRequest>>,
    config: &State<ServerConfig>,
) -> Json<DataResponse<MatchData>> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    let score = config.engine.score(
        data.resume_text.as_deref().unwrap_or(""),
        data.job_description.as_deref().unwrap_or(""),
    );

    info!("Job match score computed: {}", score);

    Json(DataResponse::success(
        format!("Specific Job Match Score: {}%", score),
        MatchData { score },
        conversation_id,
    ))
}

pub async fn skills_handler(
    request: Json<StandardRequest<SkillsRequest>>,
    config: &State<ServerConfig>,
) -> Json<DataResponse<SkillsData>> {
    let conversation_id = request.conversation_id();
    let resume_text = request.data.resume_text.as_deref().unwrap_or("");
    let skills = config.engine.extract_skills(resume_text);

    info!("Extracted {} skills", skills.len());

    Json(DataResponse::success(
        format!("Found {} skills", skills.len()),
        SkillsData { skills },
        conversation_id,
    ))
}

pub async fn suggest_handler(
    request: Json<StandardRequest<SuggestRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<SuggestData>>, ApiError> {
    let conversation_id = request.conversation_id();
    let limit = resolve_limit(request.data.limit, config, conversation_id.clone())?;

    let resume_text = request.data.resume_text.as_deref().unwrap_or("");
    let skills = config.engine.extract_skills(resume_text);
    let suggestions = config.engine.suggest(&skills, limit);

    info!(
        "Suggested {} categories from {} skills",
        suggestions.len(),
        skills.len()
    );

    Ok(Json(DataResponse::success(
        format!("Top {} job categories", suggestions.len()),
        SuggestData {
            skills,
            suggestions,
        },
        conversation_id,
    )))
}

pub async fn analyze_handler(
    request: Json<StandardRequest<AnalyzeRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<AnalysisReport>>, ApiError> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    let resume_text = data.resume_text.as_deref().unwrap_or("");
    if resume_text.trim().is_empty() {
        warn!("Analysis requested without resume text");
        return Err(bad_request(
            "Resume text is empty",
            "EMPTY_RESUME",
            &[
                "Extract the text of your resume and send it as resume_text",
                "Scanned PDFs need OCR before their text can be analyzed",
            ],
            conversation_id,
        ));
    }

    let limit = resolve_limit(data.limit, config, conversation_id.clone())?;
    let job_description = data
        .job_description
        .as_deref()
        .filter(|jd| !jd.trim().is_empty());

    let report = config.engine.analyze(resume_text, job_description, limit);

    let message = match report.match_score {
        Some(score) => format!(
            "Analysis complete! Specific Job Match Score: {}%. Skills and suggestions updated.",
            score
        ),
        None => "Analysis complete! Skills and suggestions updated.".to_string(),
    };

    info!(
        "Analysis complete: score={:?}, skills={}, suggestions={}",
        report.match_score,
        report.skills.len(),
        report.suggestions.len()
    );

    Ok(Json(DataResponse::success(message, report, conversation_id)))
}
