use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::{AssessmentService, find_assessment};
use crate::models::assessments::entities::Submission;
use crate::models::assessments::responses::{
    AssessmentSubmissionsResponse, CourseSubmissionsResponse, SubmissionGroup,
    SubmissionResponse, SubmissionWithStudent,
};
use crate::models::users::entities::UserBrief;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, find_course, internal_error, require_course_teacher,
};
use crate::storage::Storage;
use crate::try_respond;

/// 为提交记录附上学生信息
async fn attach_students(
    storage: &Arc<dyn Storage>,
    submissions: Vec<Submission>,
) -> Result<Vec<SubmissionWithStudent>, HttpResponse> {
    let mut ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let students: HashMap<i64, UserBrief> = storage
        .get_users_by_ids(&ids)
        .await
        .map_err(|e| internal_error("Failed to load students", e))?
        .iter()
        .map(|u| (u.id, UserBrief::from(u)))
        .collect();

    Ok(submissions
        .into_iter()
        .map(|submission| SubmissionWithStudent {
            student: students.get(&submission.student_id).cloned(),
            submission,
        })
        .collect())
}

pub async fn list_assessment_submissions(
    service: &AssessmentService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let assessment = try_respond!(find_assessment(&storage, assessment_id).await);
    try_respond!(require_course_teacher(&storage, assessment.course_id, &user).await);

    let submissions = match storage.list_assessment_submissions(assessment_id).await {
        Ok(submissions) => submissions,
        Err(e) => return Ok(internal_error("Failed to list submissions", e)),
    };
    let submissions = try_respond!(attach_students(&storage, submissions).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssessmentSubmissionsResponse {
            assessment,
            total_submissions: submissions.len() as i64,
            submissions,
        },
        "Submissions retrieved successfully",
    )))
}

/// 按作业分组列出课程内全部提交
pub async fn list_course_submissions(
    service: &AssessmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_teacher(&storage, course_id, &user).await);

    let assessments = match storage.list_course_assessments(course_id).await {
        Ok(assessments) => assessments,
        Err(e) => return Ok(internal_error("Failed to list assessments", e)),
    };
    let submissions = match storage.list_course_submissions(course_id).await {
        Ok(submissions) => submissions,
        Err(e) => return Ok(internal_error("Failed to list submissions", e)),
    };
    let submissions = try_respond!(attach_students(&storage, submissions).await);

    let mut by_assessment: HashMap<i64, Vec<SubmissionWithStudent>> = HashMap::new();
    for item in submissions {
        by_assessment
            .entry(item.submission.assessment_id)
            .or_default()
            .push(item);
    }

    let groups = assessments
        .into_iter()
        .map(|assessment| SubmissionGroup {
            submissions: by_assessment.remove(&assessment.id).unwrap_or_default(),
            assessment,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseSubmissionsResponse { course_id, groups },
        "Course submissions retrieved successfully",
    )))
}

/// 提交者本人或该课程教师可查看
pub async fn get_submission(
    service: &AssessmentService,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load submission", e)),
    };

    if submission.student_id != user.id {
        let assessment = try_respond!(find_assessment(&storage, submission.assessment_id).await);
        try_respond!(require_course_teacher(&storage, assessment.course_id, &user).await);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionResponse { submission },
        "Submission retrieved successfully",
    )))
}
