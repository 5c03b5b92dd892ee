use crate::models::AppData;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode or encode data file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads the data file; a missing file is an empty data set.
pub async fn read_data(path: &Path) -> Result<AppData, StoreError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppData::default()),
        Err(err) => Err(err.into()),
    }
}

pub async fn load_data(path: &Path) -> AppData {
    match read_data(path).await {
        Ok(data) => data,
        Err(err) => {
            error!("failed to load data file {}: {err}", path.display());
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}
