//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod answer_service;
mod audio_output;
mod view;

pub use answer_service::{AnswerRequest, AnswerServiceError, AnswerServicePort};
pub use audio_output::{AudioOutputError, AudioOutputPort};
pub use view::SubmissionViewPort;
