use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, find_user};
use crate::models::{ApiResponse, users::responses::UserResponse};
use crate::try_respond;

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));
    let user = try_respond!(find_user(&storage, user_id).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse::from(user),
        "User retrieved successfully",
    )))
}
