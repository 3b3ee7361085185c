use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::get::course_with_teachers;
use crate::errors::PrepEaseError;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{find_course, internal_error};
use crate::try_respond;

pub async fn assign_teacher(
    service: &CourseService,
    course_id: i64,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);

    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "User is not a teacher",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load teacher", e)),
    }

    match storage.assign_teacher(course_id, teacher_id).await {
        Ok(_) => {}
        Err(PrepEaseError::Conflict(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TeacherAlreadyAssigned,
                "Teacher is already assigned to this course",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to assign teacher", e)),
    }

    info!("Teacher {} assigned to course {}", teacher_id, course_id);
    let response = try_respond!(course_with_teachers(&storage, course).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Teacher assigned successfully",
    )))
}

pub async fn remove_teacher(
    service: &CourseService,
    course_id: i64,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);

    match storage.remove_teacher(course_id, teacher_id).await {
        Ok(true) => {
            info!("Teacher {} removed from course {}", teacher_id, course_id);
            let response = try_respond!(course_with_teachers(&storage, course).await);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Teacher removed successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotAssigned,
            "Teacher is not assigned to this course",
        ))),
        Err(e) => Ok(internal_error("Failed to remove teacher", e)),
    }
}
