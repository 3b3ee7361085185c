use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, validate_course_fields};
use crate::errors::PrepEaseError;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::courses::responses::CourseResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{internal_error, require_admin};
use crate::try_respond;

pub async fn create_course(
    service: &CourseService,
    mut course: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    try_respond!(require_admin(request));

    // 课程代码统一大写
    course.course_code = course.course_code.trim().to_uppercase();
    course.title = course.title.trim().to_string();

    try_respond!(validate_course_fields(
        Some(&course.course_code),
        Some(&course.title),
        Some(course.credits),
        Some(course.year),
    ));

    let storage = try_respond!(service.get_storage(request));

    match storage.create_course(course).await {
        Ok(course) => {
            info!("Course {} ({}) created", course.id, course.course_code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CourseResponse {
                    course,
                    teachers: Vec::new(),
                },
                "Course created successfully",
            )))
        }
        Err(PrepEaseError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CourseAlreadyExists, "Course code already exists"),
        )),
        Err(e) => Ok(internal_error("Course creation failed", e)),
    }
}
