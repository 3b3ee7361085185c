use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};

use super::EnrollmentService;
use crate::grading::summarize_roster;
use crate::models::ApiResponse;
use crate::models::enrollments::responses::{CourseRosterResponse, RosterEntry};
use crate::models::users::entities::{User, UserBrief};
use crate::services::common::{
    current_user, find_course, internal_error, require_course_teacher,
};
use crate::try_respond;

pub async fn course_roster(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_teacher(&storage, course_id, &user).await);

    let enrollments = match storage.list_course_enrollments(course_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(internal_error("Failed to load enrollments", e)),
    };
    let student_ids: Vec<i64> = enrollments.iter().map(|e| e.student_id).collect();

    let students: HashMap<i64, User> = match storage.get_users_by_ids(&student_ids).await {
        Ok(users) => users.into_iter().map(|u| (u.id, u)).collect(),
        Err(e) => return Ok(internal_error("Failed to load students", e)),
    };

    let assessments = match storage.list_course_assessments(course_id).await {
        Ok(assessments) => assessments,
        Err(e) => return Ok(internal_error("Failed to load assessments", e)),
    };
    let submissions = match storage.list_course_submissions(course_id).await {
        Ok(submissions) => submissions,
        Err(e) => return Ok(internal_error("Failed to load submissions", e)),
    };
    let quizzes = match storage.list_course_quizzes(course_id).await {
        Ok(quizzes) => quizzes,
        Err(e) => return Ok(internal_error("Failed to load quizzes", e)),
    };
    let attempts = match storage.list_course_attempts(course_id).await {
        Ok(attempts) => attempts,
        Err(e) => return Ok(internal_error("Failed to load quiz attempts", e)),
    };

    // 已删除（停用）测验的作答不计入表现
    let active_quizzes: HashSet<i64> = quizzes.iter().map(|q| q.id).collect();
    let attempts: Vec<_> = attempts
        .into_iter()
        .filter(|a| active_quizzes.contains(&a.quiz_id))
        .collect();

    let mut summaries = summarize_roster(&student_ids, &assessments, &submissions, &attempts);

    let entries: Vec<RosterEntry> = enrollments
        .iter()
        .filter_map(|enrollment| {
            let student = students.get(&enrollment.student_id)?;
            Some(RosterEntry {
                student: UserBrief::from(student),
                enrolled_at: enrollment.enrolled_at,
                performance: summaries.remove(&enrollment.student_id).unwrap_or_default(),
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseRosterResponse {
            course,
            total_students: entries.len() as i64,
            students: entries,
        },
        "Course roster retrieved successfully",
    )))
}
