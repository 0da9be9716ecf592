//! Submission Context - 提交限界上下文
//!
//! 职责:
//! - 一次提交周期内的临时实体（上传集合、查询、回答结果）
//! - 提交前置校验规则

mod errors;
mod value_objects;

pub use errors::SubmissionError;
pub use value_objects::{
    AnswerResult, Query, UploadFile, UploadSet, NO_ANSWER_PLACEHOLDER,
};
