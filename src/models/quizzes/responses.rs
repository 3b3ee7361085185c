use super::entities::{Quiz, QuizAttempt};
use crate::models::performance::QuizAttemptSummary;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizResponse {
    pub quiz: Quiz,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizAttemptResponse {
    pub attempt: QuizAttempt,
    pub passing_score: i32,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizAttemptListResponse {
    pub items: Vec<QuizAttempt>,
    pub total_attempts: i64,
    pub average_score: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct CourseAttemptsSummaryResponse {
    pub course_id: i64,
    pub items: Vec<QuizAttemptSummary>,
}
