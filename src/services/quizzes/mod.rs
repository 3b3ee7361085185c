pub mod attempts;
pub mod create;
pub mod delete;
pub mod generate;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::quizzes::entities::{Quiz, QuizQuestion};
use crate::models::quizzes::requests::{CreateQuizRequest, GenerateQuizRequest, SubmitQuizRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, internal_error};
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::common::storage_from_request(&self.storage, request)
    }

    pub async fn create_quiz(
        &self,
        body: CreateQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, body, request).await
    }

    pub async fn generate_quiz(
        &self,
        body: GenerateQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_quiz(self, body, request).await
    }

    pub async fn list_material_quizzes(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_material_quizzes(self, material_id, request).await
    }

    pub async fn list_course_quizzes(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_course_quizzes(self, course_id, request).await
    }

    pub async fn course_attempts_summary(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::course_attempts_summary(self, course_id, request).await
    }

    pub async fn get_quiz(&self, quiz_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_quiz(self, quiz_id, request).await
    }

    pub async fn submit_attempt(
        &self,
        quiz_id: i64,
        body: SubmitQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::submit_attempt(self, quiz_id, body, request).await
    }

    pub async fn list_attempts(
        &self,
        quiz_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, quiz_id, request).await
    }

    pub async fn delete_quiz(&self, quiz_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, quiz_id, request).await
    }
}

/// 查找测验，已停用的测验视为不存在
pub(crate) async fn find_active_quiz(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
) -> Result<Quiz, HttpResponse> {
    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) if quiz.is_active => Ok(quiz),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Err(internal_error("Failed to load quiz", e)),
    }
}

pub(crate) fn validate_questions(questions: &[QuizQuestion]) -> Result<(), HttpResponse> {
    if questions.is_empty() {
        return Err(bad_request(
            ErrorCode::QuizInvalidParams,
            "A quiz needs at least one question",
        ));
    }
    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;
        if question.question.trim().is_empty() {
            return Err(bad_request(
                ErrorCode::QuizInvalidParams,
                format!("Question {number} has no text"),
            ));
        }
        if question.options.len() < 2 {
            return Err(bad_request(
                ErrorCode::QuizInvalidParams,
                format!("Question {number} needs at least two options"),
            ));
        }
        if question.correct_answer < 0 || question.correct_answer as usize >= question.options.len()
        {
            return Err(bad_request(
                ErrorCode::QuizInvalidParams,
                format!("Question {number} has an out-of-range correct answer"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::QuizDifficulty;

    fn question(text: &str, options: usize, correct: i32) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: (0..options).map(|i| format!("option {i}")).collect(),
            correct_answer: correct,
            explanation: None,
            difficulty: QuizDifficulty::Easy,
        }
    }

    #[test]
    fn test_validate_questions() {
        assert!(validate_questions(&[question("Q1", 4, 0), question("Q2", 2, 1)]).is_ok());
        assert!(validate_questions(&[]).is_err());
        assert!(validate_questions(&[question(" ", 4, 0)]).is_err());
        assert!(validate_questions(&[question("Q1", 1, 0)]).is_err());
        assert!(validate_questions(&[question("Q1", 4, 4)]).is_err());
    }
}
