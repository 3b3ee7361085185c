use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::get::course_with_teachers;
use super::{CourseService, validate_course_fields};
use crate::errors::PrepEaseError;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{internal_error, require_admin};
use crate::try_respond;

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    mut update: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    try_respond!(require_admin(request));

    update.course_code = update.course_code.map(|c| c.trim().to_uppercase());
    update.title = update.title.map(|t| t.trim().to_string());

    try_respond!(validate_course_fields(
        update.course_code.as_deref(),
        update.title.as_deref(),
        update.credits,
        update.year,
    ));

    let storage = try_respond!(service.get_storage(request));

    let course = match storage.update_course(course_id, update).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(PrepEaseError::Conflict(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                "Course code already exists",
            )));
        }
        Err(e) => return Ok(internal_error("Course update failed", e)),
    };

    let response = try_respond!(course_with_teachers(&storage, course).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Course updated successfully")))
}
