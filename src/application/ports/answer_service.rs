//! Answer Service Port - 远程问答服务抽象
//!
//! 定义问答服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::submission::{AnswerResult, Query, UploadSet};

/// 问答服务错误
#[derive(Debug, Error)]
pub enum AnswerServiceError {
    #[error("Network error: {0}")]
    Network(String),

    /// 非 2xx 响应，消息已从响应体提取（缺失时为通用消息）
    #[error("{0}")]
    Service(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 问答请求
///
/// 不变量: uploads 与 query 均已通过领域校验
#[derive(Debug, Clone)]
pub struct AnswerRequest {
    pub uploads: UploadSet,
    pub query: Query,
}

/// Answer Service Port
///
/// 外部问答服务的抽象接口
#[async_trait]
pub trait AnswerServicePort: Send + Sync {
    /// 提交一次问答请求
    ///
    /// 发送上传文件与查询文本到外部分析服务，返回文本回答与可选音频
    async fn ask(&self, request: AnswerRequest) -> Result<AnswerResult, AnswerServiceError>;
}
