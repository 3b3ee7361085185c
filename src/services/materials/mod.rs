pub mod manage;
pub mod pipeline;
pub mod study_buddy;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::ai::AiClient;
use crate::config::AppConfig;
use crate::models::materials::requests::StudyBuddyRequest;
use crate::storage::Storage;
pub use pipeline::{MaterialPipeline, PipelineOutcome};

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::common::storage_from_request(&self.storage, request)
    }

    pub(crate) fn pipeline(
        &self,
        storage: Arc<dyn Storage>,
        ai: AiClient,
    ) -> MaterialPipeline {
        let config = AppConfig::get();
        MaterialPipeline::new(storage, ai, config.chunker, &config.upload.dir)
    }

    pub async fn upload(&self, request: &HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn list_course_materials(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_course_materials(self, course_id, request).await
    }

    pub async fn get_material(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::get_material(self, material_id, request).await
    }

    pub async fn delete_material(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::delete_material(self, material_id, request).await
    }

    pub async fn reprocess(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::reprocess_material(self, material_id, request).await
    }

    pub async fn study_buddy(
        &self,
        body: StudyBuddyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        study_buddy::ask(self, body, request).await
    }
}
