//! Null Audio Output - 静默输出
//!
//! 用于禁用音频或没有输出设备的环境，丢弃音频数据

use async_trait::async_trait;

use crate::application::ports::{AudioOutputError, AudioOutputPort};

/// 静默音频输出
pub struct NullAudioOutput;

#[async_trait]
impl AudioOutputPort for NullAudioOutput {
    async fn play(&self, data: Vec<u8>) -> Result<(), AudioOutputError> {
        tracing::debug!(
            audio_bytes = data.len(),
            "Audio output disabled, dropping audio"
        );
        Ok(())
    }

    async fn clear(&self) {}
}
