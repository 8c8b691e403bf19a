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
macro_rules! define_acadsys_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AcadSysError {
            $($variant(String),)*
        }

        impl AcadSysError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AcadSysError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AcadSysError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AcadSysError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AcadSysError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AcadSysError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_acadsys_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    DateParse("E007", "Date Parse Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
}

impl AcadSysError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AcadSysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AcadSysError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AcadSysError {
    fn from(err: sea_orm::DbErr) -> Self {
        AcadSysError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AcadSysError {
    fn from(err: std::io::Error) -> Self {
        AcadSysError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AcadSysError {
    fn from(err: serde_json::Error) -> Self {
        AcadSysError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AcadSysError {
    fn from(err: chrono::ParseError) -> Self {
        AcadSysError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AcadSysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AcadSysError::database_config("test").code(), "E001");
        assert_eq!(AcadSysError::validation("test").code(), "E004");
        assert_eq!(AcadSysError::not_found("test").code(), "E005");
        assert_eq!(AcadSysError::authentication("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AcadSysError::validation("test").error_type(),
            "Validation Error"
        );
        assert_eq!(
            AcadSysError::not_found("test").error_type(),
            "Resource Not Found"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AcadSysError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = AcadSysError::validation("Mark out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Mark out of range"));
    }
}
