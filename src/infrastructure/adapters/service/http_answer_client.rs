//! HTTP Answer Client - 调用外部问答 HTTP 服务
//!
//! 实现 AnswerServicePort trait，通过 HTTP 调用外部分析服务
//!
//! 外部问答 API:
//! POST {base_url}/api/query
//! Request: multipart/form-data，重复的 pdfs 文件字段 + 单个 query 文本字段
//! Response (2xx): {"answer": "...", "audio_base64": "...", "tts_error": "..."}  (JSON)
//! Response (非 2xx): {"error": "..."}  (JSON)

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{AnswerRequest, AnswerServiceError, AnswerServicePort};
use crate::domain::submission::AnswerResult;

/// 文件字段名（服务端按此名取文件列表）
const FILES_FIELD: &str = "pdfs";
/// 查询字段名
const QUERY_FIELD: &str = "query";
/// 非 2xx 响应体缺少 error 字段时的通用消息
const FALLBACK_SERVICE_ERROR: &str = "Server error";

/// 成功响应体 (JSON)
#[derive(Debug, Deserialize)]
struct AnswerBody {
    answer: Option<String>,
    /// base64 编码的音频字节
    audio_base64: Option<String>,
    /// 语音合成失败时服务端附带的说明，回答文本本身仍然有效
    tts_error: Option<String>,
}

/// 错误响应体 (JSON)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP 问答客户端配置
#[derive(Debug, Clone)]
pub struct HttpAnswerClientConfig {
    /// 问答服务基础 URL
    pub base_url: String,
}

impl Default for HttpAnswerClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

impl HttpAnswerClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// HTTP 问答客户端
///
/// 通过 HTTP 调用外部分析服务
pub struct HttpAnswerClient {
    client: Client,
    config: HttpAnswerClientConfig,
}

impl HttpAnswerClient {
    /// 创建新的 HTTP 问答客户端
    ///
    /// 不设置请求超时: 一次提交要么完成，要么因网络层失败而结束
    pub fn new(config: HttpAnswerClientConfig) -> Result<Self, AnswerServiceError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AnswerServiceError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, AnswerServiceError> {
        Self::new(HttpAnswerClientConfig::default())
    }

    /// 获取查询 URL
    fn query_url(&self) -> String {
        format!("{}/api/query", self.config.base_url)
    }

    /// 组装 multipart 请求体
    fn build_form(request: AnswerRequest) -> Result<Form, AnswerServiceError> {
        let mut form = Form::new();
        for file in request.uploads.into_files() {
            let filename = file.filename().to_string();
            let mime = file.mime_type().to_string();
            let part = Part::bytes(file.into_bytes())
                .file_name(filename)
                .mime_str(&mime)
                .map_err(|e| {
                    AnswerServiceError::Network(format!("Invalid MIME type '{}': {}", mime, e))
                })?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form.text(QUERY_FIELD, request.query.as_str().to_string()))
    }
}

/// 解析成功响应体
fn parse_answer_body(body: &str) -> Result<AnswerResult, AnswerServiceError> {
    let body: AnswerBody = serde_json::from_str(body)
        .map_err(|e| AnswerServiceError::InvalidResponse(format!("Malformed JSON: {}", e)))?;

    if let Some(tts_error) = &body.tts_error {
        tracing::warn!("Service reported a speech synthesis failure: {}", tts_error);
    }

    let audio = match body.audio_base64 {
        Some(encoded) => Some(STANDARD.decode(encoded.as_bytes()).map_err(|e| {
            AnswerServiceError::InvalidResponse(format!("Invalid base64 audio: {}", e))
        })?),
        None => None,
    };

    Ok(AnswerResult {
        answer: body.answer,
        audio,
    })
}

/// 从错误响应体提取消息，解析失败或字段缺失时回退为通用消息
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| FALLBACK_SERVICE_ERROR.to_string())
}

#[async_trait]
impl AnswerServicePort for HttpAnswerClient {
    async fn ask(&self, request: AnswerRequest) -> Result<AnswerResult, AnswerServiceError> {
        let file_count = request.uploads.len();
        let query_len = request.query.as_str().len();
        let form = Self::build_form(request)?;

        tracing::debug!(
            url = %self.query_url(),
            files = file_count,
            query_len,
            "Sending answer request"
        );

        let response = self
            .client
            .post(self.query_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnswerServiceError::Network(format!(
                        "Cannot connect to analysis service: {}",
                        e
                    ))
                } else {
                    AnswerServiceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AnswerServiceError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::debug!(status = %status, "Answer request rejected: {}", message);
            return Err(AnswerServiceError::Service(message));
        }

        let result = parse_answer_body(&body)?;

        tracing::info!(
            answered = result.answer.is_some(),
            audio_bytes = result.audio.as_ref().map(|a| a.len()).unwrap_or(0),
            "Answer request completed"
        );

        Ok(result)
    }
}
