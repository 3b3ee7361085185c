use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, find_user, validate_user_fields};
use crate::errors::PrepEaseError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::common::{forbidden, internal_error};
use crate::try_respond;
use crate::utils::password::hash_password;

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update_data.role.is_some() {
        return Ok(forbidden("Role cannot be updated"));
    }

    if let Some(email) = update_data.email.as_mut() {
        *email = email.trim().to_lowercase();
    }

    try_respond!(validate_user_fields(
        update_data.email.as_deref(),
        update_data.password.as_deref(),
        update_data.first_name.as_deref(),
        update_data.last_name.as_deref(),
    ));

    let storage = try_respond!(service.get_storage(request));
    let existing = try_respond!(find_user(&storage, user_id).await);

    if existing.role != UserRole::Student {
        update_data.department = None;
        update_data.semester = None;
    }

    if let Some(password) = update_data.password.take() {
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => return Ok(internal_error("Password hashing failed", e)),
        }
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(user),
            "User updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(PrepEaseError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::UserUpdateFailed,
            format!("Failed to update user: {}", e.message()),
        ))),
    }
}
