use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, find_assessment};
use crate::grading::build_student_report;
use crate::models::ApiResponse;
use crate::models::assessments::responses::{
    AssessmentListResponse, AssessmentResponse, StudentAssignmentsResponse,
};
use crate::models::users::entities::UserRole;
use crate::services::common::{
    current_user, find_course, forbidden, internal_error, require_course_member,
    require_course_teacher,
};
use crate::try_respond;

pub async fn get_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let assessment = try_respond!(find_assessment(&storage, assessment_id).await);
    try_respond!(require_course_member(&storage, assessment.course_id, &user).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssessmentResponse { assessment },
        "Assessment retrieved successfully",
    )))
}

pub async fn list_course_assessments(
    service: &AssessmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_teacher(&storage, course_id, &user).await);

    match storage.list_course_assessments(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssessmentListResponse { items },
            "Assessments retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list assessments", e)),
    }
}

/// 学生查看已选课程的作业及自己的完成情况
pub async fn list_student_assignments(
    service: &AssessmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    if user.role != UserRole::Student {
        return Ok(forbidden("Only students can view their assignments"));
    }

    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_member(&storage, course_id, &user).await);

    let assessments = match storage.list_course_assessments(course_id).await {
        Ok(assessments) => assessments,
        Err(e) => return Ok(internal_error("Failed to list assessments", e)),
    };
    let submissions = match storage
        .list_student_course_submissions(user.id, course_id)
        .await
    {
        Ok(submissions) => submissions,
        Err(e) => return Ok(internal_error("Failed to list submissions", e)),
    };

    let report = build_student_report(&assessments, &submissions, &[], &[]);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentAssignmentsResponse {
            course_id,
            items: report.assignments,
        },
        "Assignments retrieved successfully",
    )))
}
