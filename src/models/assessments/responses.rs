use super::entities::{Assessment, Submission};
use crate::models::users::entities::UserBrief;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentResponse {
    pub assessment: Assessment,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<Assessment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct SubmitAssessmentResponse {
    pub submission_id: i64,
    pub score: Option<f64>,
    pub correct_answers: i32,
    pub total_questions: i32,
}

// 带学生信息的提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct SubmissionWithStudent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: Option<UserBrief>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentSubmissionsResponse {
    pub assessment: Assessment,
    pub submissions: Vec<SubmissionWithStudent>,
    pub total_submissions: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct SubmissionGroup {
    pub assessment: Assessment,
    pub submissions: Vec<SubmissionWithStudent>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CourseSubmissionsResponse {
    pub course_id: i64,
    pub groups: Vec<SubmissionGroup>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct SubmissionResponse {
    pub submission: Submission,
}

/// 学生视角的课程作业列表，附带本人的提交状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct StudentAssignmentsResponse {
    pub course_id: i64,
    pub items: Vec<crate::models::performance::AssignmentProgress>,
}
