use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "quiz.ts")]
    pub enum QuizDifficulty {
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
    }
}

impl Default for QuizDifficulty {
    fn default() -> Self {
        Self::Medium
    }
}

crate::define_string_enum! {
    // 测验来源
    #[ts(export, export_to = "quiz.ts")]
    pub enum QuizSource {
        Ai => "ai",
        Manual => "manual",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "quiz.ts")]
    pub enum AttemptStatus {
        Passed => "passed",
        Failed => "failed",
    }
}

// 测验题目，correct_answer 为选项下标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: i32,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    pub material_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    // 分钟
    pub time_limit: i32,
    pub passing_score: i32,
    pub show_answers: bool,
    pub shuffle_questions: bool,
    pub difficulty: QuizDifficulty,
    pub questions: Vec<QuizQuestion>,
    pub question_count: i32,
    pub is_active: bool,
    pub generated_by: QuizSource,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 作答记录中的单题结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct AttemptAnswer {
    pub question_index: i32,
    pub selected_answer: Option<i32>,
    pub is_correct: bool,
    pub time_spent: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "quiz.ts")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub answers: Vec<AttemptAnswer>,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub status: AttemptStatus,
    // 秒
    pub time_taken: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}
