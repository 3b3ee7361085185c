use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuizService, validate_questions};
use crate::models::quizzes::entities::QuizSource;
use crate::models::quizzes::requests::{CreateQuizRequest, NewQuiz};
use crate::models::quizzes::responses::QuizResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_user, find_course, find_material, internal_error,
    require_course_teacher,
};
use crate::try_respond;

pub(crate) const DEFAULT_TIME_LIMIT: i32 = 30;
pub(crate) const DEFAULT_PASSING_SCORE: i32 = 70;
const TIME_LIMIT_RANGE: std::ops::RangeInclusive<i32> = 1..=300;

pub async fn create_quiz(
    service: &QuizService,
    body: CreateQuizRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let title = body.title.trim().to_string();
    if title.is_empty() || title.chars().count() > 200 {
        return Ok(bad_request(
            ErrorCode::QuizInvalidParams,
            "Title length must be between 1 and 200 characters",
        ));
    }
    let time_limit = body.time_limit.unwrap_or(DEFAULT_TIME_LIMIT);
    if !TIME_LIMIT_RANGE.contains(&time_limit) {
        return Ok(bad_request(
            ErrorCode::QuizInvalidParams,
            format!(
                "Time limit must be between {} and {} minutes",
                TIME_LIMIT_RANGE.start(),
                TIME_LIMIT_RANGE.end()
            ),
        ));
    }
    let passing_score = body.passing_score.unwrap_or(DEFAULT_PASSING_SCORE);
    if !(0..=100).contains(&passing_score) {
        return Ok(bad_request(
            ErrorCode::QuizInvalidParams,
            "Passing score must be between 0 and 100",
        ));
    }
    try_respond!(validate_questions(&body.questions));

    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, body.course_id).await);
    try_respond!(require_course_teacher(&storage, body.course_id, &user).await);

    if let Some(material_id) = body.material_id {
        let material = try_respond!(find_material(&storage, material_id).await);
        if material.course_id != body.course_id {
            return Ok(bad_request(
                ErrorCode::QuizInvalidParams,
                "Material does not belong to this course",
            ));
        }
    }

    let new_quiz = NewQuiz {
        course_id: body.course_id,
        material_id: body.material_id,
        created_by: user.id,
        title,
        description: body.description.map(|d| d.trim().to_string()),
        time_limit,
        passing_score,
        show_answers: body.show_answers.unwrap_or(true),
        shuffle_questions: body.shuffle_questions.unwrap_or(true),
        difficulty: body.difficulty.unwrap_or_default(),
        questions: body.questions,
        generated_by: QuizSource::Manual,
    };

    match storage.create_quiz(new_quiz).await {
        Ok(quiz) => {
            info!("Quiz {} created in course {} by user {}", quiz.id, quiz.course_id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                QuizResponse { quiz },
                "Quiz created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create quiz", e)),
    }
}
