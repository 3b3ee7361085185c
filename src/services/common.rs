//! 各业务服务共用的请求上下文与权限检查
//!
//! 返回 `Err(HttpResponse)` 的函数在调用处直接 `return Ok(resp)`。

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use std::sync::Arc;
use tracing::error;

use crate::ai::{AiClient, AiServiceError};
use crate::errors::PrepEaseError;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::Course;
use crate::models::materials::entities::Material;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn storage_from_request(
    cached: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> Result<Arc<dyn Storage>, HttpResponse> {
    if let Some(storage) = cached {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not registered in app data");
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Storage unavailable",
            ))
        })
}

pub(crate) fn ai_client_from_request(request: &HttpRequest) -> Result<AiClient, HttpResponse> {
    request
        .app_data::<web::Data<AiClient>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("AI client not registered in app data");
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::AiServiceUnavailable,
                "AI service is not configured",
            ))
        })
}

/// 当前登录用户，未登录返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 仅管理员
pub(crate) fn require_admin(request: &HttpRequest) -> Result<User, HttpResponse> {
    let user = current_user(request)?;
    if !user.is_admin() {
        return Err(forbidden("Administrator privileges required"));
    }
    Ok(user)
}

/// 存储层错误统一为 500
pub(crate) fn internal_error(context: &str, e: PrepEaseError) -> HttpResponse {
    error!("{context}: {e}");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {}", e.message()),
    ))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    ApiResponse::reply(StatusCode::FORBIDDEN, ErrorCode::Forbidden, message)
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    ApiResponse::reply(StatusCode::BAD_REQUEST, code, message)
}

pub(crate) fn ai_error(context: &str, e: &AiServiceError) -> HttpResponse {
    error!("{context}: {e}");
    HttpResponse::build(e.status_code())
        .json(ApiResponse::error_empty(e.error_code(), format!("{context}: {e}")))
}

pub(crate) async fn find_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Err(internal_error("Failed to load course", e)),
    }
}

pub(crate) async fn find_material(
    storage: &Arc<dyn Storage>,
    material_id: i64,
) -> Result<Material, HttpResponse> {
    match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) => Ok(material),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => Err(internal_error("Failed to load material", e)),
    }
}

/// 管理员，或已分配到该课程的教师
pub(crate) async fn require_course_teacher(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user: &User,
) -> Result<(), HttpResponse> {
    if user.is_admin() {
        return Ok(());
    }
    if user.role != UserRole::Teacher {
        return Err(forbidden("Only teachers of this course can perform this action"));
    }
    match storage.is_course_teacher(course_id, user.id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You are not assigned to this course",
        ))),
        Err(e) => Err(internal_error("Failed to check course teacher", e)),
    }
}

/// 课程成员：已选课学生、任课教师或管理员
pub(crate) async fn require_course_member(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user: &User,
) -> Result<(), HttpResponse> {
    match user.role {
        UserRole::Admin => Ok(()),
        UserRole::Teacher => require_course_teacher(storage, course_id, user).await,
        UserRole::Student => match storage.get_enrollment(user.id, course_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "You must be enrolled in this course",
            ))),
            Err(e) => Err(internal_error("Failed to check enrollment", e)),
        },
    }
}

/// 展开 `Result<T, HttpResponse>`，错误时直接作为响应返回
#[macro_export]
macro_rules! try_respond {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}
