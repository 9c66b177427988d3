use std::sync::Arc;

use crate::service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportService>,
}

impl AppState {
    pub fn new(reports: Arc<ReportService>) -> Self {
        Self { reports }
    }
}
