//! Submission Context - Value Objects

use serde::{Deserialize, Serialize};

use super::errors::SubmissionError;

/// 回答缺失时的占位文本
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer found.";

/// 查询文本
///
/// 不变量: 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query(String);

impl Query {
    /// 创建查询文本（自动去除首尾空白）
    pub fn new(text: impl AsRef<str>) -> Result<Self, SubmissionError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SubmissionError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 单个上传文件 - 文件名、MIME 类型与原始字节
///
/// 客户端不解析文件内容，仅原样转发
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// 根据文件名推断 MIME 类型
    pub fn mime_from_filename(filename: &str) -> &'static str {
        match filename.rsplit('.').next().map(|e| e.to_lowercase()) {
            Some(ext) if ext == "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// 上传文件集合
///
/// 不变量: 非空、保持用户选择顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSet(Vec<UploadFile>);

impl UploadSet {
    pub fn new(files: Vec<UploadFile>) -> Result<Self, SubmissionError> {
        if files.is_empty() {
            return Err(SubmissionError::EmptyUploadSet);
        }
        Ok(Self(files))
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_files(self) -> Vec<UploadFile> {
        self.0
    }
}

/// 回答结果 - 服务端成功响应的领域表示
///
/// audio 为已解码的原始音频字节（传输层 base64 已移除）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub answer: Option<String>,
    pub audio: Option<Vec<u8>>,
}

impl AnswerResult {
    /// 展示文本（缺失时返回占位文本）
    pub fn text(&self) -> &str {
        self.answer.as_deref().unwrap_or(NO_ANSWER_PLACEHOLDER)
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}
