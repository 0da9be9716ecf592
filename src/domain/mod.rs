//! Domain Layer - 领域层
//!
//! 单一限界上下文:
//! - Submission Context: 一次提交周期的实体与校验规则

pub mod submission;
