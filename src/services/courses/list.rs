use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::requests::{CourseListParams, CourseListQuery};
use crate::services::common::{current_user, internal_error};
use crate::try_respond;

pub async fn list_courses(
    service: &CourseService,
    query: CourseListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));

    match storage.list_courses_with_pagination(query.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve course list", e)),
    }
}

pub async fn list_teacher_courses(
    service: &CourseService,
    query: CourseListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    let storage = try_respond!(service.get_storage(request));

    let mut list_query = CourseListQuery::from(query);
    list_query.teacher_id = Some(user.id);

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assigned courses retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve assigned courses", e)),
    }
}
