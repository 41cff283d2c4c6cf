use axum::http::StatusCode;
use quai::{prelude::*, source};
use std::sync::Arc;
use tracing::error;

pub type ApiError = (StatusCode, String);

pub struct AppState {
    pub validations: Source,
    pub stations: Source,
    pub config: Config,
    pub dataset: Memoized<Dataset>,
}

impl AppState {
    pub fn new(validations: Source, stations: Source) -> Self {
        Self {
            validations,
            stations,
            config: Config::default(),
            dataset: Memoized::new(),
        }
    }

    /// Names every source missing from disk.
    pub fn missing_sources(&self) -> Vec<String> {
        [&self.validations, &self.stations]
            .into_iter()
            .filter(|source| !source.exists())
            .map(|source| source.to_string())
            .collect()
    }

    /// The joined dataset, reloaded only when a source changed on disk.
    pub fn load(&self) -> Result<Arc<Dataset>, source::Error> {
        self.dataset
            .get_or_load(&[&self.validations, &self.stations], || {
                Dataset::load(&self.validations, &self.stations, &self.config)
            })
    }
}

/// Same as [`AppState::load`] but off the async runtime, with errors mapped to responses.
pub async fn load_dataset(state: &Arc<AppState>) -> Result<Arc<Dataset>, ApiError> {
    let missing = state.missing_sources();
    if !missing.is_empty() {
        error!("Missing source file(s): {}", missing.join(", "));
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Source file not found: {}", missing.join(", ")),
        ));
    }

    let state = state.clone();
    tokio::task::spawn_blocking(move || state.load())
        .await
        .map_err(|err| {
            error!("Loading task failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        })?
        .map_err(|err| {
            error!("Failed to load dataset: {err}");
            let status = match err {
                source::Error::FileNotFound(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, err.to_string())
        })
}
