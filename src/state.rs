use crate::feed::DataSource;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub source: Arc<DataSource>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, source: DataSource) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            source: Arc::new(source),
        }
    }
}
