use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuizService, find_active_quiz};
use crate::errors::PrepEaseError;
use crate::grading::performance::average_attempt_score;
use crate::grading::{score_quiz, summarize_quiz_attempts};
use crate::models::quizzes::requests::{NewQuizAttempt, SubmitQuizRequest};
use crate::models::quizzes::responses::{
    CourseAttemptsSummaryResponse, QuizAttemptListResponse, QuizAttemptResponse,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, find_course, forbidden, internal_error, require_course_member,
    require_course_teacher,
};
use crate::try_respond;

pub async fn submit_attempt(
    service: &QuizService,
    quiz_id: i64,
    body: SubmitQuizRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    if user.role != UserRole::Student {
        return Ok(forbidden("Only students can submit quiz attempts"));
    }

    let storage = try_respond!(service.get_storage(request));
    let quiz = try_respond!(find_active_quiz(&storage, quiz_id).await);
    try_respond!(require_course_member(&storage, quiz.course_id, &user).await);

    // 不覆盖已有作答
    match storage.get_student_quiz_attempt(quiz.id, user.id).await {
        Ok(Some(_)) => return Ok(already_attempted()),
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check previous attempts", e)),
    }

    let result = score_quiz(&quiz.questions, &body.answers, quiz.passing_score);
    let time_taken = body.time_taken.max(0);
    let completed_at = chrono::Utc::now();

    let attempt = NewQuizAttempt {
        quiz_id: quiz.id,
        student_id: user.id,
        course_id: quiz.course_id,
        answers: result.answers,
        score: result.score,
        total_questions: result.total_questions,
        correct_answers: result.correct_answers,
        status: result.status,
        time_taken,
        started_at: completed_at - chrono::Duration::seconds(time_taken),
    };

    match storage.create_quiz_attempt(attempt).await {
        Ok(attempt) => {
            info!(
                "Student {} scored {} on quiz {} ({})",
                user.id, attempt.score, quiz.id, attempt.status
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                QuizAttemptResponse {
                    attempt,
                    passing_score: quiz.passing_score,
                },
                "Quiz submitted successfully",
            )))
        }
        // 并发提交时由唯一索引兜底
        Err(PrepEaseError::Conflict(_)) => Ok(already_attempted()),
        Err(e) => Ok(internal_error("Failed to save quiz attempt", e)),
    }
}

fn already_attempted() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::QuizAlreadyAttempted,
        "You have already attempted this quiz",
    ))
}

/// 学生只能看到自己的作答，教师看到全部
pub async fn list_attempts(
    service: &QuizService,
    quiz_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let quiz = try_respond!(find_active_quiz(&storage, quiz_id).await);
    try_respond!(require_course_member(&storage, quiz.course_id, &user).await);

    let student_filter = (user.role == UserRole::Student).then_some(user.id);

    match storage.list_quiz_attempts(quiz.id, student_filter).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizAttemptListResponse {
                total_attempts: items.len() as i64,
                average_score: average_attempt_score(&items),
                items,
            },
            "Quiz attempts retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list quiz attempts", e)),
    }
}

pub async fn course_attempts_summary(
    service: &QuizService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_teacher(&storage, course_id, &user).await);

    match storage.list_course_attempts(course_id).await {
        Ok(attempts) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseAttemptsSummaryResponse {
                course_id,
                items: summarize_quiz_attempts(&attempts),
            },
            "Quiz attempt summary retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load quiz attempts", e)),
    }
}
