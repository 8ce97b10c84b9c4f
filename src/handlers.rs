use crate::errors::AppError;
use crate::models::{ProgressPoint, SearchParams, StatsResponse, UserProgress};
use crate::render::HtmlRenderer;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{SecondsFormat, Utc};
use tracing::info;

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let Some(username) = params.username else {
        return Html(render_index(&HtmlRenderer::default().into_view()));
    };

    info!(username = %username, "page search");
    let mut renderer = HtmlRenderer::new(&username);
    // the outcome is already on the renderer
    let _ = state.fetcher.search(&username, &mut renderer).await;
    Html(render_index(&renderer.into_view()))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    info!(username = %username, "api search");
    let progress = state.fetcher.fetch_stats(&username).await?;
    Ok(Json(to_response(progress)))
}

fn to_response(progress: UserProgress) -> StatsResponse {
    StatsResponse {
        progress: progress.entries.iter().map(ProgressPoint::from).collect(),
        fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        username: progress.username,
        question_totals: progress.question_totals,
    }
}
