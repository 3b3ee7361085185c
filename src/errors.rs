//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_prepease_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PrepEaseError {
            $($variant(String),)*
        }

        impl PrepEaseError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PrepEaseError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PrepEaseError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PrepEaseError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PrepEaseError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PrepEaseError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_prepease_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    InvalidConfiguration("E014", "Invalid Configuration"),
    ExternalService("E015", "External Service Error"),
}

impl PrepEaseError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PrepEaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PrepEaseError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PrepEaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        PrepEaseError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PrepEaseError {
    fn from(err: std::io::Error) -> Self {
        PrepEaseError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PrepEaseError {
    fn from(err: serde_json::Error) -> Self {
        PrepEaseError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PrepEaseError {
    fn from(err: chrono::ParseError) -> Self {
        PrepEaseError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for PrepEaseError {
    fn from(err: reqwest::Error) -> Self {
        PrepEaseError::ExternalService(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PrepEaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PrepEaseError::cache_connection("test").code(), "E001");
        assert_eq!(PrepEaseError::database_config("test").code(), "E003");
        assert_eq!(PrepEaseError::validation("test").code(), "E007");
        assert_eq!(PrepEaseError::authentication("test").code(), "E012");
        assert_eq!(PrepEaseError::invalid_configuration("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PrepEaseError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            PrepEaseError::invalid_configuration("test").error_type(),
            "Invalid Configuration"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PrepEaseError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = PrepEaseError::conflict("already enrolled");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("already enrolled"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PrepEaseError = io.into();
        assert_eq!(err.code(), "E006");
    }
}
