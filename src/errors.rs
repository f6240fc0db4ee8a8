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
macro_rules! define_classpoint_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ClassPointError {
            $($variant(String),)*
        }

        impl ClassPointError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassPointError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassPointError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassPointError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ClassPointError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassPointError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classpoint_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    InvalidTransition("E012", "Invalid State Transition"),
    Rendering("E013", "Rendering Error"),
}

impl ClassPointError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于调用方可修正的错误（校验、缺失、状态冲突）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClassPointError::Validation(_)
                | ClassPointError::NotFound(_)
                | ClassPointError::InvalidTransition(_)
                | ClassPointError::Authorization(_)
        )
    }
}

impl fmt::Display for ClassPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassPointError {}

impl From<sea_orm::DbErr> for ClassPointError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassPointError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClassPointError {
    fn from(err: std::io::Error) -> Self {
        ClassPointError::Rendering(err.to_string())
    }
}

impl From<serde_json::Error> for ClassPointError {
    fn from(err: serde_json::Error) -> Self {
        ClassPointError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClassPointError {
    fn from(err: chrono::ParseError) -> Self {
        ClassPointError::DateParse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ClassPointError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ClassPointError::Rendering(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassPointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassPointError::cache_connection("test").code(), "E001");
        assert_eq!(ClassPointError::database_config("test").code(), "E003");
        assert_eq!(ClassPointError::validation("test").code(), "E006");
        assert_eq!(ClassPointError::invalid_transition("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassPointError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            ClassPointError::invalid_transition("test").error_type(),
            "Invalid State Transition"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassPointError::validation("Invalid RUT");
        assert_eq!(err.message(), "Invalid RUT");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ClassPointError::not_found("x").is_client_error());
        assert!(ClassPointError::invalid_transition("x").is_client_error());
        assert!(!ClassPointError::database_operation("x").is_client_error());
        assert!(!ClassPointError::rendering("x").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = ClassPointError::invalid_transition("already sent");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid State Transition"));
        assert!(formatted.contains("already sent"));
    }
}
