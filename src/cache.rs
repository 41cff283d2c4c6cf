use std::{
    fs,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::source::{self, Source};

/// Identity of a source on disk at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

impl Fingerprint {
    pub fn of(source: &Source) -> Result<Self, source::Error> {
        let path = source.path();
        let meta_data = fs::metadata(path).map_err(|err| source.not_found(err))?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: meta_data.modified()?.into(),
        })
    }

    /// Fingerprint of several sources together, e.g. the two inputs of a join.
    pub fn of_all(sources: &[&Source]) -> Result<Vec<Self>, source::Error> {
        sources.iter().map(|source| Self::of(source)).collect()
    }
}

/// Holds the last value built from a set of sources and rebuilds it only when
/// one of them changed on disk.
pub struct Memoized<T> {
    entry: RwLock<Option<(Vec<Fingerprint>, Arc<T>)>>,
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self {
            entry: RwLock::new(None),
        }
    }
}

impl<T> Memoized<T> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the cached value for `sources`, or calls `load` and caches its result.
    /// A failed load leaves the previous entry in place.
    pub fn get_or_load<F, E>(&self, sources: &[&Source], load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<source::Error>,
    {
        let fingerprints = Fingerprint::of_all(sources)?;
        {
            let entry = self.entry.read().unwrap_or_else(|err| err.into_inner());
            if let Some((cached, value)) = entry.as_ref()
                && *cached == fingerprints
            {
                return Ok(value.clone());
            }
        }

        debug!("Cache miss for {} source(s), loading...", sources.len());
        let value = Arc::new(load()?);
        let mut entry = self.entry.write().unwrap_or_else(|err| err.into_inner());
        *entry = Some((fingerprints, value.clone()));
        Ok(value)
    }

    /// Stamps of the cached entry, if any.
    pub fn fingerprints(&self) -> Option<Vec<Fingerprint>> {
        let entry = self.entry.read().unwrap_or_else(|err| err.into_inner());
        entry.as_ref().map(|(fingerprints, _)| fingerprints.clone())
    }
}
