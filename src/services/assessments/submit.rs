use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssessmentService, find_assessment};
use crate::errors::PrepEaseError;
use crate::grading::score_answer_sheet;
use crate::models::assessments::requests::{NewSubmission, SubmitAssessmentRequest};
use crate::models::assessments::responses::SubmitAssessmentResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_user, forbidden, internal_error, require_course_member,
};
use crate::try_respond;

const MAX_SUBMISSION_LENGTH: usize = 20_000;

pub async fn submit_assessment(
    service: &AssessmentService,
    body: SubmitAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    if user.role != UserRole::Student {
        return Ok(forbidden("Only students can submit assessments"));
    }

    let text = body
        .submission
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if text.is_none() && body.answers.is_none() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Either submission text or answers must be provided",
        ));
    }
    if let Some(text) = &text
        && text.chars().count() > MAX_SUBMISSION_LENGTH
    {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            format!("Submission must be at most {MAX_SUBMISSION_LENGTH} characters"),
        ));
    }

    let storage = try_respond!(service.get_storage(request));
    let assessment = try_respond!(find_assessment(&storage, body.assessment_id).await);
    try_respond!(require_course_member(&storage, assessment.course_id, &user).await);

    let answers = body.answers.unwrap_or_default();
    // 有题目且提交了答案时自动判分，但不视为已批改
    let (correct_answers, total_questions, score) =
        if !assessment.questions.is_empty() && !answers.is_empty() {
            let (correct, total, score) = score_answer_sheet(&assessment.questions, &answers);
            (correct, total, Some(f64::from(score)))
        } else {
            (0, assessment.questions.len() as i32, None)
        };

    let new_submission = NewSubmission {
        assessment_id: assessment.id,
        student_id: user.id,
        answers,
        submission_text: text,
        score,
        correct_answers,
        total_questions,
    };

    match storage.create_submission(new_submission).await {
        Ok(submission) => {
            info!(
                "Student {} submitted assessment {}",
                user.id, submission.assessment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubmitAssessmentResponse {
                    submission_id: submission.id,
                    score: submission.score,
                    correct_answers: submission.correct_answers,
                    total_questions: submission.total_questions,
                },
                "Assessment submitted successfully",
            )))
        }
        Err(PrepEaseError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyExists,
                "You have already submitted this assessment",
            ),
        )),
        Err(e) => Ok(internal_error("Failed to submit assessment", e)),
    }
}
