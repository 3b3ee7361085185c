use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    // 作业类型
    #[ts(export, export_to = "assessment.ts")]
    pub enum AssessmentKind {
        Manual => "manual",
        AiGenerated => "ai_generated",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: f64,
    pub questions: Vec<AssessmentQuestion>,
    pub kind: AssessmentKind,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Submission {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub answers: Vec<i32>,
    pub submission_text: Option<String>,
    pub score: Option<f64>,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.graded_at.is_some()
    }
}
