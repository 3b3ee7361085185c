use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use std::sync::Arc;
use tracing::debug;

use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::cached_user_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 清空 refresh_token cookie，并丢弃当前 access token 的用户缓存
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if let (Some(token), Some(cache)) = (
        token,
        request.app_data::<web::Data<Arc<dyn ObjectCache>>>(),
    ) {
        cache.remove(&cached_user_key(token)).await;
        debug!("Dropped cached user for logged out token");
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logged out")))
}
