//! Submission View Port - UI 表面抽象
//!
//! 提交表单各控件的句柄，通过构造注入而非全局查找。
//! 对应的 UI 元素: 触发按钮、结果面板、文本区域、阻塞式通知。

/// Submission View Port
pub trait SubmissionViewPort: Send + Sync {
    /// 进入/退出提交中状态（禁用触发控件并切换标签，退出时还原）
    fn set_busy(&self, busy: bool);

    /// 隐藏上一次的结果面板
    fn hide_result(&self);

    /// 显示结果面板及回答文本
    fn show_result(&self, text: &str);

    /// 阻塞式通知（alert 的等价物）
    fn notify(&self, message: &str);
}
