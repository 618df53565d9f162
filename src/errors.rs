//! 统一错误处理模块
//!
//! 存储层与启动流程返回 `SiakadError`，由服务层转换为 `ApiResponse`。
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
macro_rules! define_siakad_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SiakadError {
            $($variant(String),)*
        }

        impl SiakadError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SiakadError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SiakadError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SiakadError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SiakadError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SiakadError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_siakad_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    CreditLimit("E013", "Credit Limit Exceeded"),
}

impl SiakadError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突（重复选课、重复签到等）
    pub fn is_conflict(&self) -> bool {
        matches!(self, SiakadError::Conflict(_))
    }

    /// 附带上下文的数据库错误，约束冲突归为 Conflict
    pub fn db(context: &str, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg))
            | Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                SiakadError::Conflict(format!("{context}: {msg}"))
            }
            _ => SiakadError::DatabaseOperation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for SiakadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SiakadError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SiakadError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => SiakadError::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                SiakadError::Conflict(msg)
            }
            _ => SiakadError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for SiakadError {
    fn from(err: std::io::Error) -> Self {
        SiakadError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SiakadError {
    fn from(err: serde_json::Error) -> Self {
        SiakadError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SiakadError {
    fn from(err: chrono::ParseError) -> Self {
        SiakadError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiakadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SiakadError::cache_connection("test").code(), "E001");
        assert_eq!(SiakadError::database_operation("test").code(), "E004");
        assert_eq!(SiakadError::conflict("test").code(), "E008");
        assert_eq!(SiakadError::credit_limit("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SiakadError::credit_limit("26 > 24").error_type(),
            "Credit Limit Exceeded"
        );
        assert_eq!(
            SiakadError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SiakadError::not_found("mata kuliah 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("mata kuliah 42"));
        assert_eq!(err.to_string(), formatted);
    }

    #[test]
    fn test_generic_db_error_is_not_conflict() {
        let err: SiakadError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(!err.is_conflict());
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_db_helper_keeps_context() {
        let err = SiakadError::db("查询课程失败", sea_orm::DbErr::Custom("boom".to_string()));
        assert_eq!(err.code(), "E004");
        assert!(err.message().starts_with("查询课程失败"));
    }
}
