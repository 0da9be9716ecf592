//! Pdfvox - PDF 问答语音客户端
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Submission Context: 一次提交周期的实体与校验规则
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AnswerService、AudioOutput、SubmissionView）
//! - Commands: CQRS 命令及处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP/Fake 问答客户端、音频解码与播放、终端视图

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
