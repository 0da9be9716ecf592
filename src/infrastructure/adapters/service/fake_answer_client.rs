//! Fake Answer Client - 用于离线联调的问答客户端
//!
//! 始终返回固定的回答与音频文件，不实际调用分析服务

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{AnswerRequest, AnswerServiceError, AnswerServicePort};
use crate::domain::submission::AnswerResult;

/// Fake Answer Client 配置
#[derive(Debug, Clone)]
pub struct FakeAnswerClientConfig {
    /// 固定返回的回答文本
    pub answer_text: String,
    /// 固定返回的音频文件路径（None 表示纯文本回答）
    pub audio_file_path: Option<PathBuf>,
}

impl Default for FakeAnswerClientConfig {
    fn default() -> Self {
        Self {
            answer_text: "This is a canned answer.".to_string(),
            audio_file_path: None,
        }
    }
}

/// Fake Answer Client
///
/// 用于离线联调与测试，始终返回配置的固定回答
pub struct FakeAnswerClient {
    config: FakeAnswerClientConfig,
    /// 缓存的音频数据
    audio_data: Option<Vec<u8>>,
}

impl FakeAnswerClient {
    /// 创建新的 FakeAnswerClient
    pub fn new(config: FakeAnswerClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = match &config.audio_file_path {
            Some(path) => Some(std::fs::read(path)?),
            None => None,
        };
        tracing::info!(
            answer_len = config.answer_text.len(),
            has_audio = audio_data.is_some(),
            "FakeAnswerClient initialized"
        );
        Ok(Self { config, audio_data })
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Result<Self, std::io::Error> {
        Self::new(FakeAnswerClientConfig::default())
    }
}

#[async_trait]
impl AnswerServicePort for FakeAnswerClient {
    async fn ask(&self, request: AnswerRequest) -> Result<AnswerResult, AnswerServiceError> {
        tracing::debug!(
            files = request.uploads.len(),
            query_len = request.query.as_str().len(),
            "FakeAnswerClient: returning canned answer"
        );

        // 模拟服务端处理延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

        Ok(AnswerResult {
            answer: Some(self.config.answer_text.clone()),
            audio: self.audio_data.clone(),
        })
    }
}
