use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TinyAppError {
    Validation(String),
    EmailTaken(String),
    InvalidCredentials(String),
    AccessDenied(String),
    NotFound(String),
    PasswordHash(String),
    SessionToken(String),
    Config(String),
    Io(String),
    Storage(String),
}

impl TinyAppError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinyAppError::Validation(_) => "E001",
            TinyAppError::EmailTaken(_) => "E002",
            TinyAppError::InvalidCredentials(_) => "E003",
            TinyAppError::AccessDenied(_) => "E004",
            TinyAppError::NotFound(_) => "E005",
            TinyAppError::PasswordHash(_) => "E006",
            TinyAppError::SessionToken(_) => "E007",
            TinyAppError::Config(_) => "E008",
            TinyAppError::Io(_) => "E009",
            TinyAppError::Storage(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinyAppError::Validation(_) => "Validation Error",
            TinyAppError::EmailTaken(_) => "Email Already Registered",
            TinyAppError::InvalidCredentials(_) => "Invalid Credentials",
            TinyAppError::AccessDenied(_) => "Access Denied",
            TinyAppError::NotFound(_) => "Resource Not Found",
            TinyAppError::PasswordHash(_) => "Password Hash Error",
            TinyAppError::SessionToken(_) => "Session Token Error",
            TinyAppError::Config(_) => "Configuration Error",
            TinyAppError::Io(_) => "I/O Error",
            TinyAppError::Storage(_) => "Storage Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TinyAppError::Validation(msg)
            | TinyAppError::EmailTaken(msg)
            | TinyAppError::InvalidCredentials(msg)
            | TinyAppError::AccessDenied(msg)
            | TinyAppError::NotFound(msg)
            | TinyAppError::PasswordHash(msg)
            | TinyAppError::SessionToken(msg)
            | TinyAppError::Config(msg)
            | TinyAppError::Io(msg)
            | TinyAppError::Storage(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches a handler boundary.
    pub fn http_status(&self) -> StatusCode {
        match self {
            TinyAppError::Validation(_) | TinyAppError::EmailTaken(_) => StatusCode::BAD_REQUEST,
            TinyAppError::InvalidCredentials(_) => StatusCode::FORBIDDEN,
            TinyAppError::AccessDenied(_) => StatusCode::UNAUTHORIZED,
            TinyAppError::NotFound(_) => StatusCode::NOT_FOUND,
            TinyAppError::PasswordHash(_)
            | TinyAppError::SessionToken(_)
            | TinyAppError::Config(_)
            | TinyAppError::Io(_)
            | TinyAppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinyAppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinyAppError {}

// 便捷的构造函数
impl TinyAppError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TinyAppError::Validation(msg.into())
    }

    pub fn email_taken<T: Into<String>>(msg: T) -> Self {
        TinyAppError::EmailTaken(msg.into())
    }

    pub fn invalid_credentials<T: Into<String>>(msg: T) -> Self {
        TinyAppError::InvalidCredentials(msg.into())
    }

    pub fn access_denied<T: Into<String>>(msg: T) -> Self {
        TinyAppError::AccessDenied(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinyAppError::NotFound(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        TinyAppError::PasswordHash(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinyAppError::Config(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        TinyAppError::Storage(msg.into())
    }
}

impl From<std::io::Error> for TinyAppError {
    fn from(err: std::io::Error) -> Self {
        TinyAppError::Io(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for TinyAppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        TinyAppError::SessionToken(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for TinyAppError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        TinyAppError::PasswordHash(err.to_string())
    }
}

/// Errors that escape a handler end up here. Recoverable cases (bad form,
/// wrong password, foreign entry) are rendered by the handlers themselves, so
/// this page is mostly reached for internal failures.
impl ResponseError for TinyAppError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.http_status().is_server_error() {
            tracing::error!("{} {}", self.code(), self.format_simple());
        }

        HttpResponse::build(self.http_status())
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body(crate::api::views::render_error_page(self))
    }
}

pub type Result<T> = std::result::Result<T, TinyAppError>;
