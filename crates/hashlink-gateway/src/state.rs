use std::sync::Arc;

use hashlink_coordinator::MappingCoordinator;

#[derive(Clone)]
pub struct AppState {
    coordinator: Arc<dyn MappingCoordinator>,
}

impl AppState {
    pub fn new(coordinator: Arc<dyn MappingCoordinator>) -> Self {
        Self { coordinator }
    }

    pub fn coordinator(&self) -> &dyn MappingCoordinator {
        self.coordinator.as_ref()
    }
}
