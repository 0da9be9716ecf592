//! Submission Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("未选择任何上传文件")]
    EmptyUploadSet,

    #[error("查询内容为空")]
    EmptyQuery,
}
