use crate::models::{AppData, DashboardStats};
use crate::stats::StatsCache;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The offer data set plus the memoized dashboard rollup over it.
///
/// Every mutable borrow of the data bumps the revision, so the stats cache
/// is recomputed after any change.
#[derive(Debug, Default)]
pub struct Dashboard {
    data: AppData,
    revision: u64,
    cache: StatsCache,
}

impl Dashboard {
    pub fn new(data: AppData) -> Self {
        Self {
            data,
            revision: 0,
            cache: StatsCache::default(),
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut AppData {
        self.revision += 1;
        &mut self.data
    }

    pub fn replace(&mut self, data: AppData) {
        self.data = data;
        self.revision += 1;
        self.cache.invalidate();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stats(&mut self) -> DashboardStats {
        let data = &self.data;
        self.cache
            .get_or_compute(self.revision, || data.stats())
            .clone()
    }

    pub fn cached_revision(&self) -> Option<u64> {
        self.cache.cached_revision()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            dashboard: Arc::new(Mutex::new(Dashboard::new(data))),
        }
    }
}
