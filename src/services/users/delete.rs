use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{UserService, find_user};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::UserListQuery},
};
use crate::services::common::{bad_request, current_user, forbidden, internal_error};
use crate::try_respond;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current = try_respond!(current_user(request));
    if current.id == user_id {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        ));
    }

    let storage = try_respond!(service.get_storage(request));
    let target = try_respond!(find_user(&storage, user_id).await);

    // 至少保留一个管理员
    if target.is_admin() {
        let admins = UserListQuery {
            page: 1,
            size: 1,
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        match storage.list_users_with_pagination(admins).await {
            Ok(list) if list.pagination.total <= 1 => {
                warn!("User {} tried to delete the last admin {}", current.id, user_id);
                return Ok(forbidden("Cannot delete the last admin account"));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("Failed to count admins", e)),
        }
    }

    match storage.delete_user(user_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::UserDeleteFailed,
            format!("User deletion failed: {}", e.message()),
        ))),
    }
}
