use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::StudyBuddyRequest;
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::{SafeCourseIdI64, SafeIDI64};

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn upload(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.upload(&req, payload).await
}

pub async fn list_course_materials(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_course_materials(course_id.0, &req)
        .await
}

pub async fn get_material(req: HttpRequest, material_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(material_id.0, &req).await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(material_id.0, &req).await
}

pub async fn reprocess(req: HttpRequest, material_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.reprocess(material_id.0, &req).await
}

pub async fn study_buddy(
    req: HttpRequest,
    body: web::Json<StudyBuddyRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.study_buddy(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    let teacher_only = || middlewares::RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .wrap(teacher_only())
                    .wrap(middlewares::RateLimit::file_upload())
                    .route(web::post().to(upload)),
            )
            .service(
                web::resource("/study-buddy")
                    .wrap(middlewares::RateLimit::ai_request())
                    .route(web::post().to(study_buddy)),
            )
            .route(
                "/course/{course_id}",
                web::get().to(list_course_materials),
            )
            .service(
                web::resource("/{id}/reprocess")
                    .wrap(teacher_only())
                    .route(web::post().to(reprocess)),
            )
            .route("/{id}", web::get().to(get_material))
            .service(
                web::resource("/{id}")
                    .wrap(teacher_only())
                    .route(web::delete().to(delete_material)),
            ),
    );
}
