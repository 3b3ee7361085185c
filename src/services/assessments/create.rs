use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssessmentService, find_assessment, validate_assessment_fields};
use crate::models::assessments::requests::{CreateAssessmentRequest, UpdateAssessmentRequest};
use crate::models::assessments::responses::AssessmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, find_course, internal_error, require_course_teacher,
};
use crate::try_respond;

pub async fn create_assessment(
    service: &AssessmentService,
    mut body: CreateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    body.title = body.title.trim().to_string();
    try_respond!(validate_assessment_fields(
        Some(&body.title),
        body.total_marks,
        &body.questions,
    ));

    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, body.course_id).await);
    try_respond!(require_course_teacher(&storage, body.course_id, &user).await);

    match storage.create_assessment(body).await {
        Ok(assessment) => {
            info!(
                "Assessment {} created in course {} by user {}",
                assessment.id, assessment.course_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                AssessmentResponse { assessment },
                "Assessment created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create assessment", e)),
    }
}

pub async fn update_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    mut body: UpdateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    body.title = body.title.map(|t| t.trim().to_string());
    try_respond!(validate_assessment_fields(
        body.title.as_deref(),
        body.total_marks,
        &[],
    ));

    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let assessment = try_respond!(find_assessment(&storage, assessment_id).await);
    try_respond!(require_course_teacher(&storage, assessment.course_id, &user).await);

    match storage.update_assessment(assessment_id, body).await {
        Ok(Some(assessment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssessmentResponse { assessment },
            "Assessment updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "Assessment not found",
        ))),
        Err(e) => Ok(internal_error("Failed to update assessment", e)),
    }
}

pub async fn delete_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let assessment = try_respond!(find_assessment(&storage, assessment_id).await);
    try_respond!(require_course_teacher(&storage, assessment.course_id, &user).await);

    match storage.delete_assessment(assessment_id).await {
        Ok(true) => {
            info!("Assessment {} deleted by user {}", assessment_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Assessment deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "Assessment not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete assessment", e)),
    }
}
