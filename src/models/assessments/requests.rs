use super::entities::AssessmentQuestion;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CreateAssessmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: Option<f64>,
    #[serde(default)]
    pub questions: Vec<AssessmentQuestion>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: Option<f64>,
}

// 文本提交或按题作答二选一
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct SubmitAssessmentRequest {
    pub assessment_id: i64,
    pub submission: Option<String>,
    pub answers: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

// 新建提交（用于存储层）
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assessment_id: i64,
    pub student_id: i64,
    pub answers: Vec<i32>,
    pub submission_text: Option<String>,
    pub score: Option<f64>,
    pub correct_answers: i32,
    pub total_questions: i32,
}
