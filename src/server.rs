use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{
    net::SocketAddr,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::api::{
    ActionsRequest, AnalysisResponse, AnalyzeRequest, ApiError, ApiResponse, CompareRequest,
    OptimizeRequest, TimingQuery,
};
use post_scorer::optimizer::{
    compare_with, prioritized_actions_with, quick_optimize_with, ActionPlan, QuickOptimization,
    RandomHookSelector, VersionComparison,
};
use post_scorer::templates::{default_templates, find_template, PostTemplate};
use post_scorer::timing::{PostingMoment, TimingAnalysis, TimingRecommendation};
use post_scorer::Analyzer;

#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp_ms: u128,
}

type Rejection = (StatusCode, Json<ApiError>);

pub async fn serve(args: crate::ServeArgs, analyzer: Analyzer) -> Result<(), String> {
    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analyze/compare", post(compare_handler))
        .route("/api/analyze/optimize", post(optimize_handler))
        .route("/api/analyze/actions", post(actions_handler))
        .route("/api/timing", get(timing_handler))
        .route("/api/timing/now", get(timing_now_handler))
        .route("/api/templates/defaults", get(templates_handler))
        .route("/api/templates/:id", get(template_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(Health {
        status: "ok",
        timestamp_ms: now_ms(),
    })
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalysisResponse>>, Rejection> {
    let (content, media_count) = request.into_parts().map_err(reject)?;
    let analysis = state.analyzer.analyze(&content, media_count);
    debug!(overall_score = analysis.overall_score, "analyze request served");
    Ok(Json(ApiResponse::ok(AnalysisResponse::from_analysis(
        &content, analysis,
    ))))
}

async fn compare_handler(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ApiResponse<VersionComparison>>, Rejection> {
    let (original, modified) = request.into_parts().map_err(reject)?;
    let comparison = compare_with(&state.analyzer, &original, &modified);
    Ok(Json(ApiResponse::ok(comparison)))
}

async fn optimize_handler(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<ApiResponse<QuickOptimization>>, Rejection> {
    let (content, options) = request.into_parts().map_err(reject)?;
    let optimized = quick_optimize_with(
        &content,
        &options,
        state.analyzer.config(),
        &mut RandomHookSelector,
    );
    Ok(Json(ApiResponse::ok(optimized)))
}

async fn actions_handler(
    State(state): State<AppState>,
    Json(request): Json<ActionsRequest>,
) -> Result<Json<ApiResponse<ActionPlan>>, Rejection> {
    let content = request.into_content().map_err(reject)?;
    let plan = prioritized_actions_with(&state.analyzer, &content, 0);
    Ok(Json(ApiResponse::ok(plan)))
}

async fn timing_handler(
    State(state): State<AppState>,
    Query(query): Query<TimingQuery>,
) -> Result<Json<ApiResponse<TimingRecommendation>>, Rejection> {
    let moment = query.moment(current_moment()).map_err(reject)?;
    let recommendation = state.analyzer.timing().recommend(query.timezone(), moment.day);
    Ok(Json(ApiResponse::ok(recommendation)))
}

async fn timing_now_handler(
    State(state): State<AppState>,
    Query(query): Query<TimingQuery>,
) -> Result<Json<ApiResponse<TimingAnalysis>>, Rejection> {
    let moment = query.moment(current_moment()).map_err(reject)?;
    let analysis = state.analyzer.timing().at(moment, query.timezone());
    debug!(
        day = %moment.day,
        hour = moment.hour,
        optimal = analysis.is_optimal_time,
        "timing request served"
    );
    Ok(Json(ApiResponse::ok(analysis)))
}

async fn templates_handler() -> Json<ApiResponse<&'static [PostTemplate]>> {
    Json(ApiResponse::ok(default_templates()))
}

async fn template_handler(
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<&'static PostTemplate>>, Rejection> {
    let template =
        find_template(&id).map_err(|err| (StatusCode::NOT_FOUND, Json(ApiError::from(err))))?;
    Ok(Json(ApiResponse::ok(template)))
}

fn reject(err: crate::api::ValidationError) -> Rejection {
    (StatusCode::BAD_REQUEST, Json(ApiError::from(err)))
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}

pub fn current_moment() -> PostingMoment {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0);
    PostingMoment::from_unix_seconds(seconds)
}
