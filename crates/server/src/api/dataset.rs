use crate::{
    api::filter_from_params,
    dto::{DatasetDto, RecordDto},
    state::{AppState, load_dataset},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, sync::Arc};

type ApiResult = Result<Response, (StatusCode, String)>;

pub async fn dataset(State(state): State<Arc<AppState>>) -> ApiResult {
    let dataset = load_dataset(&state).await?;
    let fingerprints = state.dataset.fingerprints().unwrap_or_default();
    Ok(Json(DatasetDto::from(&dataset, &fingerprints)).into_response())
}

pub async fn day_types(State(state): State<Arc<AppState>>) -> ApiResult {
    let dataset = load_dataset(&state).await?;
    Ok(Json(dataset.day_types()).into_response())
}

pub async fn stations(State(state): State<Arc<AppState>>) -> ApiResult {
    let dataset = load_dataset(&state).await?;
    Ok(Json(dataset.selectable_stations()).into_response())
}

pub async fn summary(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let filter = filter_from_params(&params).map_err(|status| (status, bad_filter()))?;
    let dataset = load_dataset(&state).await?;
    Ok(Json(dataset.summary(&filter)).into_response())
}

/// The filtered validation rows, ordered by station then hour.
pub async fn records(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let filter = filter_from_params(&params).map_err(|status| (status, bad_filter()))?;
    let dataset = load_dataset(&state).await?;
    let mut records = dataset.filtered_validations(&filter);
    records.sort_by(|a, b| {
        a.station_key
            .cmp(&b.station_key)
            .then_with(|| a.hour.cmp(&b.hour))
    });
    let result: Vec<_> = records.into_iter().map(RecordDto::from).collect();
    Ok(Json(result).into_response())
}

pub(crate) fn bad_filter() -> String {
    "Invalid filter: from and to must be hours".to_string()
}
