use crate::models::AttendanceStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<AttendanceStore>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: AttendanceStore) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
        }
    }
}
