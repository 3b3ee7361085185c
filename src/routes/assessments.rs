use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{
    CreateAssessmentRequest, GradeSubmissionRequest, SubmitAssessmentRequest,
    UpdateAssessmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssessmentService;
use crate::utils::{SafeCourseIdI64, SafeIDI64};

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

pub async fn submit(
    req: HttpRequest,
    body: web::Json<SubmitAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.submit(body.into_inner(), &req).await
}

pub async fn list_student_assignments(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_student_assignments(course_id.0, &req)
        .await
}

pub async fn list_assessment_submissions(
    req: HttpRequest,
    assessment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessment_submissions(assessment_id.0, &req)
        .await
}

pub async fn list_course_submissions(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_course_submissions(course_id.0, &req)
        .await
}

pub async fn get_submission(req: HttpRequest, submission_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_submission(submission_id.0, &req).await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .grade_submission(submission_id.0, body.into_inner(), &req)
        .await
}

pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(body.into_inner(), &req)
        .await
}

pub async fn list_course_assessments(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_course_assessments(course_id.0, &req)
        .await
}

pub async fn get_assessment(req: HttpRequest, assessment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(assessment_id.0, &req).await
}

pub async fn update_assessment(
    req: HttpRequest,
    assessment_id: SafeIDI64,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(assessment_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_assessment(
    req: HttpRequest,
    assessment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .delete_assessment(assessment_id.0, &req)
        .await
}

// 配置路由
pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    let teacher_only = || middlewares::RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            // 学生
            .service(
                web::resource("/submit")
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route(web::post().to(submit)),
            )
            .route(
                "/student/course/{course_id}",
                web::get().to(list_student_assignments),
            )
            .route("/submission/{id}", web::get().to(get_submission))
            // 教师
            .service(
                web::resource("/submissions/assignment/{id}")
                    .wrap(teacher_only())
                    .route(web::get().to(list_assessment_submissions)),
            )
            .service(
                web::resource("/submissions/course/{course_id}")
                    .wrap(teacher_only())
                    .route(web::get().to(list_course_submissions)),
            )
            .service(
                web::resource("/submission/{id}/grade")
                    .wrap(teacher_only())
                    .route(web::put().to(grade_submission)),
            )
            .service(
                web::resource("/course/{course_id}")
                    .wrap(teacher_only())
                    .route(web::get().to(list_course_assessments)),
            )
            .service(
                web::resource("")
                    .wrap(teacher_only())
                    .route(web::post().to(create_assessment)),
            )
            // 修改与删除由服务层校验任课教师身份
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assessment))
                    .route(web::put().to(update_assessment))
                    .route(web::delete().to(delete_assessment)),
            ),
    );
}
