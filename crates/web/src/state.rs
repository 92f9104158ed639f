use std::sync::Arc;

use upstream::ProgramService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ProgramService>,
}

impl AppState {
    pub fn new(service: Arc<dyn ProgramService>) -> Self {
        Self { service }
    }
}
