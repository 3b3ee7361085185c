use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;
use tracing::{info, warn};

use super::MaterialService;
use super::upload::remove_upload;
use crate::config::AppConfig;
use crate::models::materials::entities::{Material, MaterialStatus};
use crate::models::materials::responses::{MaterialListResponse, MaterialResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    ai_client_from_request, current_user, find_course, find_material, internal_error,
    require_course_member, require_course_teacher,
};
use crate::try_respond;

pub async fn list_course_materials(
    service: &MaterialService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_member(&storage, course_id, &user).await);

    match storage.list_course_materials(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MaterialListResponse { items },
            "Materials retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list materials", e)),
    }
}

pub async fn get_material(
    service: &MaterialService,
    material_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let material = try_respond!(find_material(&storage, material_id).await);
    try_respond!(require_course_member(&storage, material.course_id, &user).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MaterialResponse { material },
        "Material retrieved successfully",
    )))
}

/// 上传者、任课教师或管理员可删除
pub async fn delete_material(
    service: &MaterialService,
    material_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let material = try_respond!(find_material(&storage, material_id).await);
    if material.uploaded_by != user.id {
        try_respond!(require_course_teacher(&storage, material.course_id, &user).await);
    }

    match storage.delete_material(material.id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "Material not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to delete material", e)),
    }

    let config = AppConfig::get();
    remove_upload(Path::new(&config.upload.dir), &material.stored_name).await;

    // 向量数据清理失败不影响删除结果
    if let Ok(ai) = ai_client_from_request(request)
        && let Err(e) = ai.delete_lecture(material.id).await
    {
        warn!("Failed to remove vectors of material {}: {e}", material.id);
    }

    info!("Material {} deleted by user {}", material.id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Material deleted successfully")))
}

/// 处理中超过该时长未更新视为已中断（如进程重启）
const STALE_PROCESSING_MINUTES: i64 = 15;

/// 处理中的资料只有在长时间未更新时才允许重新处理
fn can_reprocess(material: &Material, now: chrono::DateTime<chrono::Utc>) -> bool {
    material.status != MaterialStatus::Processing
        || now - material.updated_at >= chrono::Duration::minutes(STALE_PROCESSING_MINUTES)
}

/// 重新执行后台处理，返回 202
pub async fn reprocess_material(
    service: &MaterialService,
    material_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let material = try_respond!(find_material(&storage, material_id).await);
    try_respond!(require_course_teacher(&storage, material.course_id, &user).await);

    if !can_reprocess(&material, chrono::Utc::now()) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Material is already being processed",
        )));
    }

    let ai = try_respond!(ai_client_from_request(request));
    if let Err(e) = service
        .pipeline(storage.clone(), ai)
        .start(material.clone())
        .await
    {
        return Ok(internal_error("Failed to start material processing", e));
    }

    info!("Material {} reprocessing requested by user {}", material.id, user.id);
    Ok(HttpResponse::Accepted().json(ApiResponse::success(
        MaterialResponse { material },
        "Material processing restarted",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::entities::{AiStatus, MaterialFileType};

    fn material(status: MaterialStatus, updated_at: chrono::DateTime<chrono::Utc>) -> Material {
        Material {
            id: 1,
            course_id: 1,
            uploaded_by: 1,
            title: "Lecture".into(),
            file_name: "lecture.pdf".into(),
            stored_name: "1-abc.pdf".into(),
            file_type: MaterialFileType::Pdf,
            status,
            ai_status: AiStatus::Pending,
            text_content: None,
            chunk_count: 0,
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn test_reprocess_rejects_only_live_processing() {
        let now = chrono::Utc::now();
        let fresh = material(MaterialStatus::Processing, now - chrono::Duration::minutes(2));
        let stale = material(MaterialStatus::Processing, now - chrono::Duration::minutes(20));

        assert!(!can_reprocess(&fresh, now));
        assert!(can_reprocess(&stale, now));
        assert!(can_reprocess(&material(MaterialStatus::Ready, now), now));
        assert!(can_reprocess(&material(MaterialStatus::Pending, now), now));
    }
}
