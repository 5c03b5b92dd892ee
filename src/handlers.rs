use crate::errors::AppError;
use crate::models::{
    DashboardStats, DeletedResponse, ListQuery, NewOffer, OfferSummary, SnapshotRequest, Tag,
    TagResponse,
};
use crate::offers::View;
use crate::state::AppState;
use crate::storage::{persist_data, read_data};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, Utc};
use tracing::info;

pub async fn list_offers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OfferSummary>>, AppError> {
    let view = match query.view.as_deref() {
        Some(raw) => View::parse(raw).ok_or_else(|| {
            AppError::bad_request("view must be one of 'all', 'pinned', 'favorites', 'archived'")
        })?,
        None => View::All,
    };

    let dashboard = state.dashboard.lock().await;
    Ok(Json(dashboard.data().list(view, query.search.as_deref())))
}

pub async fn create_offer(
    State(state): State<AppState>,
    Json(payload): Json<NewOffer>,
) -> Result<(StatusCode, Json<OfferSummary>), AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let offer = dashboard.data_mut().create_offer(payload, Utc::now())?;
    persist_data(&state.data_path, dashboard.data()).await?;

    info!(id = %offer.id, name = %offer.name, "offer created");
    Ok((StatusCode::CREATED, Json(dashboard.data().summarize(&offer))))
}

pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferSummary>, AppError> {
    let dashboard = state.dashboard.lock().await;
    let data = dashboard.data();
    let offer = data.offer(&id)?;
    Ok(Json(data.summarize(offer)))
}

pub async fn delete_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let removed = dashboard.data_mut().delete_offer(&id)?;
    persist_data(&state.data_path, dashboard.data()).await?;

    info!(id = %removed.id, "offer deleted");
    Ok(Json(DeletedResponse {
        id: removed.id,
        deleted: true,
    }))
}

pub async fn record_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SnapshotRequest>,
) -> Result<Json<OfferSummary>, AppError> {
    let date = payload.date.unwrap_or_else(today_string);

    let mut dashboard = state.dashboard.lock().await;
    let offer = dashboard
        .data_mut()
        .record_snapshot(&id, &date, payload.active_ads, Utc::now())?;
    persist_data(&state.data_path, dashboard.data()).await?;

    info!(id = %offer.id, %date, active_ads = payload.active_ads, "snapshot recorded");
    Ok(Json(dashboard.data().summarize(&offer)))
}

pub async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TagResponse>, AppError> {
    apply_toggle(&state, id, Tag::Pinned).await.map(Json)
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TagResponse>, AppError> {
    apply_toggle(&state, id, Tag::Favorite).await.map(Json)
}

pub async fn toggle_archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TagResponse>, AppError> {
    apply_toggle(&state, id, Tag::Archived).await.map(Json)
}

async fn apply_toggle(state: &AppState, id: String, tag: Tag) -> Result<TagResponse, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let active = dashboard.data_mut().toggle(&id, tag)?;
    persist_data(&state.data_path, dashboard.data()).await?;

    info!(%id, ?tag, active, "offer tag toggled");
    Ok(TagResponse { id, tag, active })
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    Ok(Json(dashboard.stats()))
}

pub async fn refresh(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let data = read_data(&state.data_path).await?;
    let offers = data.offers.len();
    dashboard.replace(data);

    info!(offers, revision = dashboard.revision(), "offers refreshed from disk");
    Ok(Json(dashboard.stats()))
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
