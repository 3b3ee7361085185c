use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::materials::entities::AiStatus;
use crate::models::materials::requests::StudyBuddyRequest;
use crate::models::materials::responses::StudyBuddyResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    ai_client_from_request, ai_error, bad_request, current_user, find_material,
    require_course_member,
};
use crate::try_respond;

const MAX_QUESTION_LENGTH: usize = 500;

pub async fn ask(
    service: &MaterialService,
    body: StudyBuddyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let question = body.question.trim();
    if question.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Question cannot be empty"));
    }
    if question.chars().count() > MAX_QUESTION_LENGTH {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            format!("Question must be at most {MAX_QUESTION_LENGTH} characters"),
        ));
    }

    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));
    let material = try_respond!(find_material(&storage, body.material_id).await);
    try_respond!(require_course_member(&storage, material.course_id, &user).await);

    if material.ai_status != AiStatus::Processed {
        return Ok(bad_request(
            ErrorCode::MaterialNotProcessed,
            "Material has not been processed by the AI service yet",
        ));
    }

    let ai = try_respond!(ai_client_from_request(request));
    match ai.study_buddy(question, material.id).await {
        Ok(answer) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudyBuddyResponse {
                answer: answer.answer,
                confidence: answer.confidence,
                sources_used: answer.sources_used,
                material_id: material.id,
            },
            "Answer generated successfully",
        ))),
        Err(e) => Ok(ai_error("Study buddy request failed", &e)),
    }
}
