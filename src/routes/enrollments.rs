use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::EnrollRequest;
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeCourseIdI64, SafeStudentIdI64};

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn enroll(req: HttpRequest, body: web::Json<EnrollRequest>) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(body.into_inner(), &req).await
}

pub async fn unenroll(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.unenroll(course_id.0, &req).await
}

pub async fn my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.my_courses(&req).await
}

pub async fn my_course_details(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.my_course_details(course_id.0, &req).await
}

pub async fn course_roster(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.course_roster(course_id.0, &req).await
}

pub async fn student_course_details(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .student_course_details(course_id.0, student_id.0, &req)
        .await
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    let student_only = || middlewares::RequireRole::new(&UserRole::Student);

    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/enroll")
                    .wrap(student_only())
                    .route(web::post().to(enroll)),
            )
            .service(
                web::resource("/my-courses")
                    .wrap(student_only())
                    .route(web::get().to(my_courses)),
            )
            .service(
                web::resource("/my-course/{course_id}/details")
                    .wrap(student_only())
                    .route(web::get().to(my_course_details)),
            )
            .service(
                web::scope("/course")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("/{course_id}", web::get().to(course_roster))
                    .route(
                        "/{course_id}/student/{student_id}/details",
                        web::get().to(student_course_details),
                    ),
            )
            .route("/{course_id}", web::delete().to(unenroll)),
    );
}
