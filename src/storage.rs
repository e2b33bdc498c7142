use crate::errors::AppError;
use crate::models::AttendanceStore;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> PathBuf {
    env::var("APP_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/attendance.json"))
}

pub async fn load_store(path: &Path) -> AttendanceStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AttendanceStore>(&bytes) {
            Ok(store) => {
                info!(members = store.members.len(), path = %path.display(), "loaded attendance store");
                store
            }
            Err(err) => {
                error!("failed to parse attendance store: {err}");
                AttendanceStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AttendanceStore::default(),
        Err(err) => {
            error!("failed to read attendance store: {err}");
            AttendanceStore::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &AttendanceStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}
