use crate::{
    api::{bad_filter, filter_from_params},
    dto::MapDto,
    state::{AppState, load_dataset},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quai::prelude::*;
use std::{collections::HashMap, sync::Arc};

type ApiResult = Result<Response, (StatusCode, String)>;

pub async fn profile(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let filter = filter_from_params(&params).map_err(|status| (status, bad_filter()))?;
    let dataset = load_dataset(&state).await?;
    let records = dataset.filtered_validations(&filter);
    Ok(Json(hourly_profile(records)).into_response())
}

pub async fn distribution(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let filter = filter_from_params(&params).map_err(|status| (status, bad_filter()))?;
    let dataset = load_dataset(&state).await?;
    let records = dataset.filtered_joined(&filter);
    Ok(Json(mode_distribution(records)).into_response())
}

/// With a single day type selected the heatmap has one row, so every day type
/// of the selected stations is shown instead.
pub async fn heatmap(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let filter = filter_from_params(&params).map_err(|status| (status, bad_filter()))?;
    let dataset = load_dataset(&state).await?;
    let filter = if filter.day_type.is_some() {
        Filter::new().stations(filter.stations)
    } else {
        filter
    };
    let records = dataset.filtered_validations(&filter);
    Ok(Json(quai::aggregate::heatmap(records)).into_response())
}

pub async fn map(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let filter = filter_from_params(&params).map_err(|status| (status, bad_filter()))?;
    let dataset = load_dataset(&state).await?;
    let records = dataset.filtered_joined(&filter);
    Ok(Json(MapDto::from(geo_summary(records))).into_response())
}
