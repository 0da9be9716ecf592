//! Console Adapter - 终端 UI 实现

mod console_view;

pub use console_view::ConsoleView;
