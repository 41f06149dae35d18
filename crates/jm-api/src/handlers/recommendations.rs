use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use jm_common::api::recommendation::{
    MatchScore, RecommendationsResponse, ResumeRecommendationsResponse,
};
use jm_common::api::requests::{
    RecommendationRequest, ResumeRecommendationRequest, ScoreJobRequest,
};
use jm_common::matching::{RankOptions, RankQuery, rank, score_one};
use jm_common::skill_extractor::{extract_skills, merge_skills};
use tracing::info;

use crate::SharedState;
use crate::error::ApiError;

/// Recommendation list: coverage mode with the recommendation weights.
pub async fn recommend(
    State(state): State<SharedState>,
    Query(query): Query<RankQuery>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let now = request.now.unwrap_or_else(Utc::now);
    let options = query.apply(
        RankOptions::new(state.profiles.recommendations, now),
        state.profiles.default_limit,
    );

    let ranked = rank(&request.candidate, &request.jobs, &options);
    jm_metrics::record_ranking("recommendations", request.jobs.len(), ranked.len());

    Ok(Json(RecommendationsResponse::from_results(&ranked)))
}

/// Profile-only list: the candidate's stored skills ranked with the resume
/// profile (Jaccard), no resume text involved.
pub async fn recommend_for_profile(
    State(state): State<SharedState>,
    Query(query): Query<RankQuery>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let now = request.now.unwrap_or_else(Utc::now);
    let options = query.apply(
        RankOptions::new(state.profiles.resume, now),
        state.profiles.default_limit,
    );

    let ranked = rank(&request.candidate, &request.jobs, &options);
    jm_metrics::record_ranking("profile", request.jobs.len(), ranked.len());

    Ok(Json(RecommendationsResponse::from_results(&ranked)))
}

/// Detail view for one job, as whole percentages.
pub async fn score_job(
    State(state): State<SharedState>,
    Json(request): Json<ScoreJobRequest>,
) -> Result<Json<MatchScore>, ApiError> {
    let now = request.now.unwrap_or_else(Utc::now);
    let result = score_one(
        &request.candidate,
        &request.job,
        &state.profiles.recommendations.weights,
        now,
    );

    Ok(Json(MatchScore::from(&result)))
}

/// Merges skills found in the resume text into the candidate, then reranks
/// with the resume profile (Jaccard mode). Text without known skills leaves
/// the candidate's skills as they are.
pub async fn recommend_from_resume(
    State(state): State<SharedState>,
    Query(query): Query<RankQuery>,
    Json(request): Json<ResumeRecommendationRequest>,
) -> Result<Json<ResumeRecommendationsResponse>, ApiError> {
    let now = request.now.unwrap_or_else(Utc::now);
    let extracted_skills = extract_skills(&request.resume_text);

    let mut candidate = request.candidate;
    candidate.skills = merge_skills(&candidate.skills, &extracted_skills);

    let options = query.apply(
        RankOptions::new(state.profiles.resume, now),
        state.profiles.default_limit,
    );
    let ranked = rank(&candidate, &request.jobs, &options);
    jm_metrics::record_ranking("resume", request.jobs.len(), ranked.len());

    info!(
        candidate_id = candidate.id.as_deref().unwrap_or(""),
        extracted = extracted_skills.len(),
        skills = candidate.skills.len(),
        returned = ranked.len(),
        "resume recommendations computed"
    );

    let list = RecommendationsResponse::from_results(&ranked);
    Ok(Json(ResumeRecommendationsResponse {
        extracted_skills,
        updated_skills: candidate.skills,
        count: list.count,
        recommendations: list.recommendations,
    }))
}
