pub mod api;
pub mod model;
pub mod nav;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use opencms_core::Module;

use service::CmsService;

/// CMS Module — content, taxonomy and navigation management.
pub struct CmsModule {
    service: Arc<CmsService>,
}

impl CmsModule {
    pub fn new(service: CmsService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &Arc<CmsService> {
        &self.service
    }
}

impl Module for CmsModule {
    fn name(&self) -> &str {
        "cms"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
