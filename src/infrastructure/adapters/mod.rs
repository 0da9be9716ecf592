//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod console;
pub mod service;

pub use audio::*;
pub use console::*;
pub use service::*;
