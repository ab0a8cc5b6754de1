use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};
use url::Url;

use crate::{
    app_state::AppState,
    extractor::{self, SelectStrategy, filter},
    fetcher::{self, FetchError, render},
    pop::dtos::{
        DebugCounts, ErrorResponse, FilterEcho, PopQuery, PopReportResponse, normalize_slug,
    },
};

#[utoipa::path(
    get,
    path = "/pop/{set_slug}",
    tag = "pop",
    params(PopQuery),
    responses(
        (status = 200, description = "Extracted pop report", body = PopReportResponse),
        (status = 400, description = "Missing or blank set slug", body = ErrorResponse),
        (status = 502, description = "Page could not be acquired", body = ErrorResponse)
    )
)]
pub async fn get_pop_report(
    State(state): State<AppState>,
    Path(set_slug): Path<String>,
    Query(query): Query<PopQuery>,
) -> Response {
    let slug = normalize_slug(&set_slug);
    if slug.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "set slug is required");
    }

    let source = format!("{}/{}", state.config.pop_base_url().trim_end_matches('/'), slug);

    let (html, strategy) = match acquire(&state, &source).await {
        Ok(acquired) => acquired,
        Err(err) => return acquisition_failure(&source, err),
    };

    // Parsing is CPU-bound; keep it off the async worker.
    let outcome = match tokio::task::spawn_blocking(move || extractor::extract(&html, strategy))
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("extraction failed for {source}: {err}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "extraction failed");
        }
    };

    let record_filter = filter::RecordFilter {
        name: query.pokemon_name.clone(),
        number: query.card_number.clone(),
        limit: query.limit,
    };
    let total_found = outcome.records.len();
    let cards = filter::apply(outcome.records, &record_filter);

    info!(
        "extracted {} cards from {} ({} after filters)",
        total_found,
        source,
        cards.len()
    );

    Json(PopReportResponse {
        ok: true,
        source,
        total_found,
        returned: cards.len(),
        filtered_by: FilterEcho {
            pokemon_name: query.pokemon_name,
            card_number: query.card_number,
        },
        cards,
        debug: query.debug.unwrap_or(false).then_some(DebugCounts {
            candidate_blocks: outcome.candidate_blocks,
            kept_blocks: outcome.kept_blocks,
        }),
    })
    .into_response()
}

/// Direct fetches keep the structural selection path; rendered pages carry no
/// known structure, so they go through the broad sweep.
async fn acquire(state: &AppState, source: &str) -> Result<(String, SelectStrategy), FetchError> {
    if let Some(renderer) = &state.renderer {
        let url = Url::parse(source)?;
        let html = render::render(renderer.as_ref(), &url, state.config.render_budget()).await?;
        return Ok((html, SelectStrategy::BroadSweep));
    }
    let page = fetcher::fetch(source).await?;
    Ok((page.body_utf8, SelectStrategy::StructuralFirst))
}

fn acquisition_failure(source: &str, err: FetchError) -> Response {
    warn!("failed to acquire {source}: {err}");
    let status = err.upstream_status().unwrap_or(StatusCode::BAD_GATEWAY);
    error_response(
        status,
        &format!("failed to acquire pop report page: {err}"),
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
