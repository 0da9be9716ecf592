//! Console View - UI 表面的终端实现
//!
//! 将表单控件的状态变化映射为终端输出:
//! 结果面板对应标准输出，阻塞式通知对应标准错误

use crate::application::ports::SubmissionViewPort;

/// 终端视图
pub struct ConsoleView;

impl ConsoleView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionViewPort for ConsoleView {
    fn set_busy(&self, busy: bool) {
        // 触发控件的 "Processing..." 标签；终端上无需恢复动作
        if busy {
            println!("Processing...");
        }
    }

    fn hide_result(&self) {}

    fn show_result(&self, text: &str) {
        println!();
        println!("Answer:");
        println!("{}", text);
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}
