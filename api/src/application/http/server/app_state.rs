use std::sync::Arc;

use medigate_core::application::MedigateService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MedigateService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MedigateService) -> Self {
        Self { args, service }
    }
}
