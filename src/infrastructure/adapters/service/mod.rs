//! Answer Service Adapter - 问答服务客户端实现

mod fake_answer_client;
mod http_answer_client;

pub use fake_answer_client::{FakeAnswerClient, FakeAnswerClientConfig};
pub use http_answer_client::*;
