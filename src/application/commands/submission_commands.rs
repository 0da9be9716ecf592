//! Submission Commands

use crate::domain::submission::UploadFile;

/// 提交问答命令
///
/// 携带用户的原始输入，校验由处理器完成
#[derive(Debug, Clone)]
pub struct SubmitQuestion {
    /// 用户选择的上传文件（允许为空，空集合在校验阶段被拒绝）
    pub files: Vec<UploadFile>,
    /// 原始查询文本（处理器负责去除空白并校验）
    pub query: String,
}
