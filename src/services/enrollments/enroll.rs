use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, require_student};
use crate::errors::PrepEaseError;
use crate::models::enrollments::responses::EnrollmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_user, find_course, internal_error};
use crate::try_respond;

pub async fn enroll(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    try_respond!(require_student(&user, "enroll in courses"));

    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);
    if !course.is_active {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Course is not open for enrollment",
        ));
    }

    match storage.enroll_student(user.id, course_id).await {
        Ok(enrollment) => {
            info!("Student {} enrolled in course {}", user.id, course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                EnrollmentResponse { enrollment },
                "Successfully enrolled in course",
            )))
        }
        Err(PrepEaseError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "You are already enrolled in this course",
            ),
        )),
        Err(e) => Ok(internal_error("Failed to enroll in course", e)),
    }
}

pub async fn unenroll(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    try_respond!(require_student(&user, "unenroll from courses"));

    let storage = try_respond!(service.get_storage(request));

    match storage.unenroll_student(user.id, course_id).await {
        Ok(true) => {
            info!("Student {} unenrolled from course {}", user.id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Successfully unenrolled from course",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "You are not enrolled in this course",
        ))),
        Err(e) => Ok(internal_error("Failed to unenroll from course", e)),
    }
}
