use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::{info, warn};

use super::QuizService;
use super::create::{DEFAULT_PASSING_SCORE, DEFAULT_TIME_LIMIT};
use crate::ai::GeneratedQuestion;
use crate::models::materials::entities::AiStatus;
use crate::models::quizzes::entities::{QuizDifficulty, QuizQuestion, QuizSource};
use crate::models::quizzes::requests::{GenerateQuizRequest, NewQuiz};
use crate::models::quizzes::responses::QuizResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    ai_client_from_request, ai_error, bad_request, current_user, find_material, internal_error,
    require_course_teacher,
};
use crate::try_respond;

const QUESTION_COUNT_RANGE: std::ops::RangeInclusive<i32> = 1..=20;

pub async fn generate_quiz(
    service: &QuizService,
    body: GenerateQuizRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let difficulty = match body.difficulty.as_deref().map(str::trim) {
        None | Some("") => QuizDifficulty::default(),
        Some(raw) => match raw.to_ascii_lowercase().parse::<QuizDifficulty>() {
            Ok(difficulty) => difficulty,
            Err(_) => {
                return Ok(bad_request(
                    ErrorCode::QuizInvalidParams,
                    "Difficulty must be one of: easy, medium, hard",
                ));
            }
        },
    };
    if !QUESTION_COUNT_RANGE.contains(&body.question_count) {
        return Ok(bad_request(
            ErrorCode::QuizInvalidParams,
            format!(
                "Question count must be between {} and {}",
                QUESTION_COUNT_RANGE.start(),
                QUESTION_COUNT_RANGE.end()
            ),
        ));
    }

    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let material = try_respond!(find_material(&storage, body.material_id).await);
    try_respond!(require_course_teacher(&storage, material.course_id, &user).await);

    if material.ai_status != AiStatus::Processed {
        return Ok(bad_request(
            ErrorCode::MaterialNotProcessed,
            "Material has not been processed by the AI service yet",
        ));
    }

    let ai = try_respond!(ai_client_from_request(request));
    let generated = match ai
        .generate_quiz(material.id, difficulty, body.question_count)
        .await
    {
        Ok(questions) => questions,
        Err(e) => return Ok(ai_error("Quiz generation failed", &e)),
    };

    let questions = dedupe_questions(generated, difficulty);
    if questions.is_empty() {
        warn!("AI service returned no usable questions for material {}", material.id);
        return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
            ErrorCode::AiServiceError,
            "AI service returned no usable questions",
        )));
    }

    let new_quiz = NewQuiz {
        course_id: material.course_id,
        material_id: Some(material.id),
        created_by: user.id,
        title: format!("Quiz: {}", material.title),
        description: None,
        time_limit: DEFAULT_TIME_LIMIT,
        passing_score: DEFAULT_PASSING_SCORE,
        show_answers: true,
        shuffle_questions: true,
        difficulty,
        questions,
        generated_by: QuizSource::Ai,
    };

    match storage.create_quiz(new_quiz).await {
        Ok(quiz) => {
            info!(
                "Generated quiz {} with {} questions from material {}",
                quiz.id, quiz.question_count, material.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                QuizResponse { quiz },
                "Quiz generated successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to save generated quiz", e)),
    }
}

/// 去掉题干重复（忽略大小写与首尾空白）及不完整的题目
fn dedupe_questions(
    generated: Vec<GeneratedQuestion>,
    difficulty: QuizDifficulty,
) -> Vec<QuizQuestion> {
    let mut seen = HashSet::new();
    generated
        .into_iter()
        .filter(|q| {
            let valid_answer =
                q.correct_answer >= 0 && (q.correct_answer as usize) < q.options.len();
            !q.question.trim().is_empty() && q.options.len() >= 2 && valid_answer
        })
        .filter(|q| seen.insert(q.question.trim().to_lowercase()))
        .map(|q| q.into_quiz_question(difficulty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(text: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            question: text.to_string(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: 2,
            explanation: None,
        }
    }

    #[test]
    fn test_dedupe_questions() {
        let questions = dedupe_questions(
            vec![
                generated("What is a borrow?"),
                generated("  what is a BORROW?  "),
                generated("What is a lifetime?"),
            ],
            QuizDifficulty::Hard,
        );
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "What is a borrow?");
        assert_eq!(questions[1].question, "What is a lifetime?");
        assert!(questions.iter().all(|q| q.difficulty == QuizDifficulty::Hard));
    }

    #[test]
    fn test_dedupe_drops_incomplete_questions() {
        let mut bad_answer = generated("Out of range");
        bad_answer.correct_answer = 3;
        let mut no_options = generated("No options");
        no_options.options.clear();

        let questions = dedupe_questions(
            vec![bad_answer, no_options, generated(""), generated("Kept")],
            QuizDifficulty::Medium,
        );
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Kept");
    }
}
