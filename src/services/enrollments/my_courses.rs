use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, require_student};
use crate::models::ApiResponse;
use crate::models::enrollments::responses::{MyCourseItem, MyCoursesResponse};
use crate::models::users::entities::UserBrief;
use crate::services::common::{current_user, internal_error};
use crate::try_respond;

pub async fn list_my_courses(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_respond!(current_user(request));
    try_respond!(require_student(&user, "view enrolled courses"));

    let storage = try_respond!(service.get_storage(request));

    let enrollments = match storage.list_student_enrollments(user.id).await {
        Ok(enrollments) => enrollments,
        Err(e) => return Ok(internal_error("Failed to load enrollments", e)),
    };

    let mut items = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        // 课程被删除时选课记录随之级联删除，这里仍跳过缺失的课程
        let course = match storage.get_course_by_id(enrollment.course_id).await {
            Ok(Some(course)) => course,
            Ok(None) => continue,
            Err(e) => return Ok(internal_error("Failed to load course", e)),
        };
        let teachers = match storage.list_course_teachers(course.id).await {
            Ok(teachers) => teachers,
            Err(e) => return Ok(internal_error("Failed to load course teachers", e)),
        };
        items.push(MyCourseItem {
            course,
            teachers: teachers.iter().map(UserBrief::from).collect(),
            enrolled_at: enrollment.enrolled_at,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MyCoursesResponse { items },
        "Enrolled courses retrieved successfully",
    )))
}
