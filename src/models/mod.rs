//! 数据模型定义
//!
//! 业务实体、请求和响应结构体，与 `entity` 模块中的数据库实体分离。

pub mod assessments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod materials;
pub mod performance;
pub mod quizzes;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功，其余按模块分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 用户 21xx
    UserNotFound = 2100,
    UserAlreadyExists = 2101,
    UserEmailInvalid = 2102,
    UserPasswordInvalid = 2103,
    UserNameInvalid = 2104,
    UserUpdateFailed = 2105,
    UserDeleteFailed = 2106,
    CanNotDeleteCurrentUser = 2107,

    // 课程 3xxx
    CourseNotFound = 3000,
    CourseAlreadyExists = 3001,
    CoursePermissionDenied = 3002,
    TeacherAlreadyAssigned = 3003,
    TeacherNotAssigned = 3004,

    // 选课 31xx
    EnrollmentNotFound = 3100,
    AlreadyEnrolled = 3101,
    NotEnrolled = 3102,

    // 作业 4xxx
    AssessmentNotFound = 4000,
    SubmissionNotFound = 4001,
    SubmissionAlreadyExists = 4002,

    // 测验 41xx
    QuizNotFound = 4100,
    QuizAlreadyAttempted = 4101,
    QuizInvalidParams = 4102,

    // 资料 5xxx
    MaterialNotFound = 5000,
    MaterialNotProcessed = 5001,
    FileUploadFailed = 5002,
    FileTypeNotAllowed = 5003,
    FileSizeExceeded = 5004,
    FileNotFound = 5005,
    MultifileUploadNotAllowed = 5006,

    // AI 服务 6xxx
    AiServiceUnavailable = 6000,
    AiServiceError = 6001,
    AiResourceNotFound = 6002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::QuizAlreadyAttempted as i32, 4101);
        assert_eq!(ErrorCode::AiServiceUnavailable as i32, 6000);
    }
}
