/*!
 * 速率限制中间件
 *
 * 基于 moka 的固定窗口计数，窗口从该键的第一个请求开始计时。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * 已认证请求按用户 ID 计数，否则按客户端 IP 计数；超过限制返回 429，
 * 放行的响应带 `X-RateLimit-Limit` / `X-RateLimit-Remaining` 头。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// 计数窗口
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

// 键: 前缀:标识，空闲一小时后淘汰
static WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    scope: &'static str,
}

impl RateLimit {
    pub fn new(scope: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            scope,
        }
    }

    /// 登录：5次/分钟
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 学生自助注册：3次/分钟
    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 资料上传：10次/分钟
    pub fn file_upload() -> Self {
        Self::new("upload", 10, 60)
    }

    /// 转发到 AI 服务的请求（学习助手、测验生成）：20次/分钟
    pub fn ai_request() -> Self {
        Self::new("ai", 20, 60)
    }
}

/// 决策结果
enum Decision {
    Allow { remaining: u32 },
    Reject { retry_after: u64 },
}

fn decide(window: Option<Window>, now: Instant, limit: &RateLimit) -> (Decision, Window) {
    let current = match window {
        Some(w) if now.duration_since(w.started) < limit.window => w,
        _ => Window {
            started: now,
            count: 0,
        },
    };

    if current.count >= limit.max_requests {
        let elapsed = now.duration_since(current.started);
        let retry_after = limit.window.saturating_sub(elapsed).as_secs().max(1);
        return (Decision::Reject { retry_after }, current);
    }

    let next = Window {
        count: current.count + 1,
        ..current
    };
    (
        Decision::Allow {
            remaining: limit.max_requests - next.count,
        },
        next,
    )
}

/// 客户端 IP，`realip_remote_addr` 已处理 Forwarded / X-Forwarded-For
fn client_ip(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let Some(addr) = info.realip_remote_addr() else {
        return "unknown".to_string();
    };
    addr.parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| addr.parse::<IpAddr>())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|_| addr.to_string())
}

fn rate_limit_key(req: &ServiceRequest, scope: &str) -> String {
    // 先释放 extensions 的借用，connection_info() 需要可变借用
    let user_id = req.extensions().get::<User>().map(|user| user.id);
    match user_id {
        Some(id) => format!("{scope}:user:{id}"),
        None => format!("{scope}:ip:{}", client_ip(req)),
    }
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((RETRY_AFTER, retry_after.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please retry later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = rate_limit_key(&req, limit.scope);
            let (decision, window) = decide(WINDOWS.get(&key).await, Instant::now(), &limit);
            WINDOWS.insert(key.clone(), window).await;

            match decision {
                Decision::Reject { retry_after } => {
                    warn!(
                        "Rate limit exceeded for {} ({}/{})",
                        key, window.count, limit.max_requests
                    );
                    Ok(req.into_response(too_many_requests(retry_after).map_into_right_body()))
                }
                Decision::Allow { remaining } => {
                    let mut res = srv.call(req).await?.map_into_left_body();
                    let headers = res.headers_mut();
                    headers.insert(LIMIT_HEADER, HeaderValue::from(limit.max_requests));
                    headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
                    Ok(res)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_resets_after_expiry() {
        let limit = RateLimit::new("unit", 2, 60);
        let start = Instant::now();

        let (first, w) = decide(None, start, &limit);
        assert!(matches!(first, Decision::Allow { remaining: 1 }));
        let (second, w) = decide(Some(w), start, &limit);
        assert!(matches!(second, Decision::Allow { remaining: 0 }));
        let (third, w) = decide(Some(w), start + Duration::from_secs(15), &limit);
        assert!(matches!(third, Decision::Reject { retry_after: 45 }));

        let (fresh, w) = decide(Some(w), start + Duration::from_secs(61), &limit);
        assert!(matches!(fresh, Decision::Allow { remaining: 1 }));
        assert_eq!(w.count, 1);
    }

    #[test]
    fn test_presets() {
        assert_eq!(RateLimit::login().max_requests, 5);
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::ai_request().scope, "ai");
        assert_eq!(RateLimit::file_upload().window, Duration::from_secs(60));
    }

    #[actix_web::test]
    async fn test_requests_over_limit_rejected() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new("test_over_limit", 2, 60))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let call = || {
            test::TestRequest::get()
                .uri("/limited")
                .peer_addr("10.1.2.3:4000".parse().unwrap())
                .to_request()
        };

        let resp = test::call_service(&app, call()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-ratelimit-remaining").unwrap(), "1");
        let resp = test::call_service(&app, call()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, call()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key(RETRY_AFTER));
    }

    #[actix_web::test]
    async fn test_anonymous_posts_counted_per_ip() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/login")
                    .wrap(RateLimit::new("test_anonymous_ip", 1, 60))
                    .route(web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let login_from = |peer: &str| {
            test::TestRequest::post()
                .uri("/login")
                .peer_addr(peer.parse().unwrap())
                .set_json(serde_json::json!({"email": "a@b.c", "password": "x"}))
                .to_request()
        };

        let resp = test::call_service(&app, login_from("10.9.0.1:5000")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, login_from("10.9.0.1:5001")).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        let resp = test::call_service(&app, login_from("10.9.0.2:5000")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-ratelimit-remaining").unwrap(), "0");
    }
}
