use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssessmentService, find_assessment};
use crate::models::assessments::requests::GradeSubmissionRequest;
use crate::models::assessments::responses::SubmissionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_user, internal_error, require_course_teacher,
};
use crate::try_respond;

const MAX_FEEDBACK_LENGTH: usize = 5_000;

pub async fn grade_submission(
    service: &AssessmentService,
    submission_id: i64,
    body: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !body.score.is_finite() {
        return Ok(bad_request(ErrorCode::BadRequest, "Score must be a number"));
    }
    let feedback = body
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());
    if let Some(feedback) = &feedback
        && feedback.chars().count() > MAX_FEEDBACK_LENGTH
    {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            format!("Feedback must be at most {MAX_FEEDBACK_LENGTH} characters"),
        ));
    }

    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load submission", e)),
    };
    let assessment = try_respond!(find_assessment(&storage, submission.assessment_id).await);
    try_respond!(require_course_teacher(&storage, assessment.course_id, &user).await);

    let score = clamp_score(body.score, assessment.total_marks);

    match storage
        .grade_submission(submission_id, score, feedback, user.id)
        .await
    {
        Ok(Some(submission)) => {
            info!(
                "Submission {} graded {} by user {}",
                submission_id, score, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse { submission },
                "Submission graded successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(internal_error("Failed to grade submission", e)),
    }
}

fn clamp_score(score: f64, total_marks: f64) -> f64 {
    score.clamp(0.0, total_marks.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(85.0, 100.0), 85.0);
        assert_eq!(clamp_score(120.0, 100.0), 100.0);
        assert_eq!(clamp_score(-5.0, 100.0), 0.0);
        assert_eq!(clamp_score(12.5, 20.0), 12.5);
    }
}
