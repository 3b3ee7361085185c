use super::entities::{AttemptAnswer, AttemptStatus, QuizDifficulty, QuizQuestion, QuizSource};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct GenerateQuizRequest {
    pub material_id: i64,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default = "default_question_count")]
    pub question_count: i32,
}

fn default_question_count() -> i32 {
    5
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct CreateQuizRequest {
    pub course_id: i64,
    pub material_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub time_limit: Option<i32>,
    pub passing_score: Option<i32>,
    pub show_answers: Option<bool>,
    pub shuffle_questions: Option<bool>,
    pub difficulty: Option<QuizDifficulty>,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct SubmittedAnswer {
    pub selected_answer: Option<i32>,
    #[serde(default)]
    pub time_spent: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct SubmitQuizRequest {
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub time_taken: i64,
}

// 新建测验（用于存储层，默认值已由服务层填充）
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub course_id: i64,
    pub material_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub time_limit: i32,
    pub passing_score: i32,
    pub show_answers: bool,
    pub shuffle_questions: bool,
    pub difficulty: QuizDifficulty,
    pub questions: Vec<QuizQuestion>,
    pub generated_by: QuizSource,
}

// 新建作答记录（用于存储层）
#[derive(Debug, Clone)]
pub struct NewQuizAttempt {
    pub quiz_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub answers: Vec<AttemptAnswer>,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub status: AttemptStatus,
    pub time_taken: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
}
