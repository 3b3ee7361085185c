use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::entities::Course;
use crate::models::courses::responses::CourseResponse;
use crate::models::users::entities::UserBrief;
use crate::services::common::{find_course, internal_error};
use crate::storage::Storage;
use crate::try_respond;

/// 课程及其授课教师
pub(crate) async fn course_with_teachers(
    storage: &Arc<dyn Storage>,
    course: Course,
) -> Result<CourseResponse, HttpResponse> {
    let teachers = storage
        .list_course_teachers(course.id)
        .await
        .map_err(|e| internal_error("Failed to load course teachers", e))?;
    Ok(CourseResponse {
        course,
        teachers: teachers.iter().map(UserBrief::from).collect(),
    })
}

pub async fn get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));
    let course = try_respond!(find_course(&storage, course_id).await);
    let response = try_respond!(course_with_teachers(&storage, course).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Course retrieved successfully",
    )))
}
