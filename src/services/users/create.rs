use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, validate_user_fields};
use crate::errors::PrepEaseError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::common::{bad_request, internal_error};
use crate::try_respond;
use crate::utils::password::hash_password;

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 管理员账号只由启动流程生成
    if user_data.role == UserRole::Admin {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Role must be student or teacher",
        ));
    }

    user_data.email = user_data.email.trim().to_lowercase();
    user_data.first_name = user_data.first_name.trim().to_string();
    user_data.last_name = user_data.last_name.trim().to_string();

    try_respond!(validate_user_fields(
        Some(&user_data.email),
        Some(&user_data.password),
        Some(&user_data.first_name),
        Some(&user_data.last_name),
    ));

    // 院系与学期只对学生有意义
    if user_data.role != UserRole::Student {
        user_data.department = None;
        user_data.semester = None;
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    let storage = try_respond!(service.get_storage(request));

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("Admin created {} account {}", user.role, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse::from(user),
                "Account created successfully",
            )))
        }
        Err(PrepEaseError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "User with this email already exists",
            ),
        )),
        Err(e) => Ok(internal_error("User creation failed", e)),
    }
}
