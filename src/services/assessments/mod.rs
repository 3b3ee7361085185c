pub mod create;
pub mod grade;
pub mod list;
pub mod submissions;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::entities::{Assessment, AssessmentQuestion};
use crate::models::assessments::requests::{
    CreateAssessmentRequest, GradeSubmissionRequest, SubmitAssessmentRequest,
    UpdateAssessmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, internal_error};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::common::storage_from_request(&self.storage, request)
    }

    pub async fn create_assessment(
        &self,
        body: CreateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, body, request).await
    }

    pub async fn update_assessment(
        &self,
        assessment_id: i64,
        body: UpdateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::update_assessment(self, assessment_id, body, request).await
    }

    pub async fn delete_assessment(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::delete_assessment(self, assessment_id, request).await
    }

    pub async fn get_assessment(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::get_assessment(self, assessment_id, request).await
    }

    pub async fn list_course_assessments(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_course_assessments(self, course_id, request).await
    }

    pub async fn list_student_assignments(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_student_assignments(self, course_id, request).await
    }

    pub async fn submit(
        &self,
        body: SubmitAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assessment(self, body, request).await
    }

    pub async fn list_assessment_submissions(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::list_assessment_submissions(self, assessment_id, request).await
    }

    pub async fn list_course_submissions(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::list_course_submissions(self, course_id, request).await
    }

    pub async fn get_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::get_submission(self, submission_id, request).await
    }

    pub async fn grade_submission(
        &self,
        submission_id: i64,
        body: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, submission_id, body, request).await
    }
}

pub(crate) async fn find_assessment(
    storage: &Arc<dyn Storage>,
    assessment_id: i64,
) -> Result<Assessment, HttpResponse> {
    match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => Ok(assessment),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "Assessment not found",
        ))),
        Err(e) => Err(internal_error("Failed to load assessment", e)),
    }
}

pub(crate) fn validate_assessment_fields(
    title: Option<&str>,
    total_marks: Option<f64>,
    questions: &[AssessmentQuestion],
) -> Result<(), HttpResponse> {
    if let Some(title) = title
        && (title.trim().is_empty() || title.chars().count() > 200)
    {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "Title length must be between 1 and 200 characters",
        ));
    }
    if let Some(total_marks) = total_marks
        && !(total_marks.is_finite() && total_marks > 0.0)
    {
        return Err(bad_request(
            ErrorCode::BadRequest,
            "Total marks must be a positive number",
        ));
    }
    for (index, question) in questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            return Err(bad_request(
                ErrorCode::BadRequest,
                format!("Question {} has no text", index + 1),
            ));
        }
        if question.options.len() < 2 {
            return Err(bad_request(
                ErrorCode::BadRequest,
                format!("Question {} needs at least two options", index + 1),
            ));
        }
        if question.correct_answer < 0 || question.correct_answer as usize >= question.options.len()
        {
            return Err(bad_request(
                ErrorCode::BadRequest,
                format!("Question {} has an out-of-range correct answer", index + 1),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: usize, correct: i32) -> AssessmentQuestion {
        AssessmentQuestion {
            text: "What is ownership?".to_string(),
            options: (0..options).map(|i| format!("option {i}")).collect(),
            correct_answer: correct,
            explanation: None,
        }
    }

    #[test]
    fn test_validate_assessment_fields() {
        assert!(validate_assessment_fields(Some("Week 1"), Some(50.0), &[question(4, 2)]).is_ok());
        assert!(validate_assessment_fields(None, None, &[]).is_ok());
        assert!(validate_assessment_fields(Some("  "), None, &[]).is_err());
        assert!(validate_assessment_fields(Some("Week 1"), Some(0.0), &[]).is_err());
        assert!(validate_assessment_fields(Some("Week 1"), None, &[question(1, 0)]).is_err());
        assert!(validate_assessment_fields(Some("Week 1"), None, &[question(3, 3)]).is_err());
        assert!(validate_assessment_fields(Some("Week 1"), None, &[question(3, -1)]).is_err());
    }
}
