use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuizService, find_active_quiz};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, forbidden, internal_error};
use crate::try_respond;

/// 软删除，仅创建者或管理员
pub async fn delete_quiz(
    service: &QuizService,
    quiz_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let quiz = try_respond!(find_active_quiz(&storage, quiz_id).await);

    if quiz.created_by != user.id && !user.is_admin() {
        return Ok(forbidden("You can only delete quizzes you created"));
    }

    match storage.deactivate_quiz(quiz.id).await {
        Ok(true) => {
            info!("Quiz {} deactivated by user {}", quiz.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Quiz deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(internal_error("Failed to delete quiz", e)),
    }
}
