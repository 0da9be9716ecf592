//! 应用层错误定义
//!
//! 一次提交的终态错误分类，均通过阻塞式通知反馈给用户

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 本地前置校验失败，请求未发出
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 服务端返回非成功状态
    #[error("Service error: {0}")]
    ServiceError(String),

    /// 网络或解码层失败
    #[error("Transport error: {0}")]
    TransportError(String),

    /// 已有提交在进行中
    #[error("A submission is already in flight")]
    AlreadyInFlight,
}

impl ApplicationError {
    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建服务错误
    pub fn service(message: impl Into<String>) -> Self {
        Self::ServiceError(message.into())
    }

    /// 创建传输错误
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError(message.into())
    }

    /// 用户可见消息（不含错误类别前缀）
    pub fn user_message(&self) -> &str {
        match self {
            Self::ValidationError(message)
            | Self::ServiceError(message)
            | Self::TransportError(message) => message,
            Self::AlreadyInFlight => "A submission is already in flight",
        }
    }
}
