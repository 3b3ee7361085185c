use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, find_active_quiz};
use crate::models::ApiResponse;
use crate::models::quizzes::responses::{QuizListResponse, QuizResponse};
use crate::services::common::{
    current_user, find_course, find_material, internal_error, require_course_member,
};
use crate::try_respond;

pub async fn get_quiz(
    service: &QuizService,
    quiz_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let quiz = try_respond!(find_active_quiz(&storage, quiz_id).await);
    try_respond!(require_course_member(&storage, quiz.course_id, &user).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizResponse { quiz },
        "Quiz retrieved successfully",
    )))
}

pub async fn list_material_quizzes(
    service: &QuizService,
    material_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let material = try_respond!(find_material(&storage, material_id).await);
    try_respond!(require_course_member(&storage, material.course_id, &user).await);

    match storage.list_material_quizzes(material_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizListResponse { items },
            "Quizzes retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list quizzes", e)),
    }
}

pub async fn list_course_quizzes(
    service: &QuizService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    try_respond!(find_course(&storage, course_id).await);
    try_respond!(require_course_member(&storage, course_id, &user).await);

    match storage.list_course_quizzes(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizListResponse { items },
            "Quizzes retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list quizzes", e)),
    }
}
