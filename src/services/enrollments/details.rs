use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{EnrollmentService, require_student};
use crate::grading::build_student_report;
use crate::models::enrollments::responses::StudentCourseDetailsResponse;
use crate::models::performance::StudentCourseReport;
use crate::models::users::entities::UserBrief;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, find_course, internal_error, require_course_teacher,
};
use crate::storage::Storage;
use crate::try_respond;

/// 汇总学生在课程中的作业与测验表现
pub(crate) async fn load_student_report(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    student_id: i64,
) -> Result<StudentCourseReport, HttpResponse> {
    let assessments = storage
        .list_course_assessments(course_id)
        .await
        .map_err(|e| internal_error("Failed to load assessments", e))?;
    let submissions = storage
        .list_student_course_submissions(student_id, course_id)
        .await
        .map_err(|e| internal_error("Failed to load submissions", e))?;
    let quizzes = storage
        .list_course_quizzes(course_id)
        .await
        .map_err(|e| internal_error("Failed to load quizzes", e))?;
    let attempts = storage
        .list_student_course_attempts(student_id, course_id)
        .await
        .map_err(|e| internal_error("Failed to load quiz attempts", e))?;

    Ok(build_student_report(
        &assessments,
        &submissions,
        &quizzes,
        &attempts,
    ))
}

pub async fn my_course_details(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    try_respond!(require_student(&user, "view enrolled course details"));

    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);

    let enrollment = match storage.get_enrollment(user.id, course_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "You are not enrolled in this course",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load enrollment", e)),
    };

    let report = try_respond!(load_student_report(&storage, course_id, user.id).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentCourseDetailsResponse {
            course,
            student: UserBrief::from(&user),
            enrolled_at: enrollment.enrolled_at,
            report,
        },
        "Course details retrieved successfully",
    )))
}

pub async fn student_course_details(
    service: &EnrollmentService,
    course_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_teacher(&storage, course_id, &user).await);

    let enrollment = match storage.get_enrollment(student_id, course_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "Student is not enrolled in this course",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load enrollment", e)),
    };

    let student = match storage.get_user_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load student", e)),
    };

    let report = try_respond!(load_student_report(&storage, course_id, student_id).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentCourseDetailsResponse {
            course,
            student: UserBrief::from(&student),
            enrolled_at: enrollment.enrolled_at,
            report,
        },
        "Student course details retrieved successfully",
    )))
}
