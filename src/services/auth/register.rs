use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::PrepEaseError;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode, auth::RegisterRequest};
use crate::services::common::internal_error;
use crate::services::users::validate_user_fields;
use crate::try_respond;
use crate::utils::password::hash_password;

use super::AuthService;

/// 公开注册只创建学生账号
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));

    let mut create_request = CreateUserRequest {
        email: register_request.email.trim().to_string(),
        password: register_request.password,
        first_name: register_request.first_name.trim().to_string(),
        last_name: register_request.last_name.trim().to_string(),
        role: UserRole::Student,
        department: register_request.department,
        semester: register_request.semester,
    };

    try_respond!(validate_user_fields(
        Some(&create_request.email),
        Some(&create_request.password),
        Some(&create_request.first_name),
        Some(&create_request.last_name),
    ));

    match storage.get_user_by_email(&create_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already registered",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Register failed", e)),
    }

    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Register failed", e)),
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("Student {} registered", user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse::from(user),
                "Registration successful",
            )))
        }
        // 并发注册同一邮箱时由唯一索引兜底
        Err(PrepEaseError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "Email already registered"),
        )),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            format!("Register failed: {}", e.message()),
        ))),
    }
}
