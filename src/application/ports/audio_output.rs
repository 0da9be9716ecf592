//! Audio Output Port - 音频播放抽象
//!
//! 回答音频的播放出口（浏览器 audio 元素的等价物）

use async_trait::async_trait;
use thiserror::Error;

/// 音频输出错误
#[derive(Debug, Error)]
pub enum AudioOutputError {
    #[error("Decoding error: {0}")]
    Decode(String),

    #[error("Audio device error: {0}")]
    Device(String),
}

/// Audio Output Port
#[async_trait]
pub trait AudioOutputPort: Send + Sync {
    /// 解码并播放一段音频，播放结束后返回
    async fn play(&self, data: Vec<u8>) -> Result<(), AudioOutputError>;

    /// 清除当前音频源，中断未完成的播放
    async fn clear(&self);
}
