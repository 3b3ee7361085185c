use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::quizzes::entities::AttemptStatus;

crate::define_string_enum! {
    // 作业完成状态
    #[ts(export, export_to = "performance.ts")]
    pub enum AssignmentStatus {
        Graded => "graded",
        Submitted => "submitted",
        Pending => "pending",
    }
}

/// 单个作业的完成情况
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct AssignmentProgress {
    pub assessment_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: f64,
    pub submitted: bool,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub score: Option<f64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub feedback: Option<String>,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct AttemptView {
    pub attempt_id: i64,
    pub score: i32,
    pub status: AttemptStatus,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub time_taken: i64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// 单个测验的作答情况，attempts 按完成时间倒序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct QuizProgress {
    pub quiz_id: i64,
    pub title: String,
    pub passing_score: i32,
    pub question_count: i32,
    pub attempts_count: i64,
    pub latest_score: Option<i32>,
    pub latest_status: Option<AttemptStatus>,
    pub latest_completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub attempts: Vec<AttemptView>,
}

/// 学生在某门课程中的综合表现
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct PerformanceSummary {
    pub assignment_total: i64,
    pub assignment_submitted: i64,
    pub assignment_completion: i64,
    pub average_assignment_score: i64,
    pub quiz_attempts: i64,
    pub average_quiz_score: i64,
    pub performance_score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct StudentCourseReport {
    pub summary: PerformanceSummary,
    pub assignments: Vec<AssignmentProgress>,
    pub quizzes: Vec<QuizProgress>,
}

/// 课程内每个测验的作答统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "performance.ts")]
pub struct QuizAttemptSummary {
    pub quiz_id: i64,
    pub attempt_count: i64,
    pub average_score: i64,
}
