//! Cpal Audio Output - 通过系统默认输出设备播放
//!
//! cpal 流句柄非 Send，播放在专用阻塞线程内建立并销毁；
//! clear() 通过停止标志中断当前播放

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::decoder::{decode_to_pcm, DecodedAudio};
use crate::application::ports::{AudioOutputError, AudioOutputPort};

/// Cpal 音频输出
pub struct CpalAudioOutput {
    /// 当前播放的停止标志，新播放或 clear() 时置位
    current: Mutex<Option<Arc<AtomicBool>>>,
}

impl CpalAudioOutput {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn interrupt_current(&self) {
        if let Some(flag) = self.current.lock().unwrap().take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for CpalAudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioOutputPort for CpalAudioOutput {
    async fn play(&self, data: Vec<u8>) -> Result<(), AudioOutputError> {
        let decoded = decode_to_pcm(&data)?;

        self.interrupt_current();
        let stop = Arc::new(AtomicBool::new(false));
        *self.current.lock().unwrap() = Some(stop.clone());

        tracing::debug!(
            sample_rate = decoded.sample_rate,
            channels = decoded.channels,
            duration_ms = decoded.duration_ms,
            "Starting audio playback"
        );

        tokio::task::spawn_blocking(move || play_blocking(decoded, stop))
            .await
            .map_err(|e| AudioOutputError::Device(format!("Playback task failed: {}", e)))?
    }

    async fn clear(&self) {
        self.interrupt_current();
    }
}

/// 在当前线程上建立输出流并阻塞至播放完成或被中断
fn play_blocking(decoded: DecodedAudio, stop: Arc<AtomicBool>) -> Result<(), AudioOutputError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AudioOutputError::Device("No output device available".to_string()))?;

    let config = cpal::StreamConfig {
        channels: decoded.channels.max(1) as u16,
        sample_rate: cpal::SampleRate(decoded.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let samples = Arc::new(decoded.samples);
    let position = Arc::new(AtomicUsize::new(0));
    let done = Arc::new(AtomicBool::new(false));

    let stream = {
        let samples = samples.clone();
        let position = position.clone();
        let done = done.clone();
        device
            .build_output_stream(
                &config,
                move |out: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let start = position.load(Ordering::Relaxed);
                    let remaining = samples.len().saturating_sub(start);
                    let take = remaining.min(out.len());
                    out[..take].copy_from_slice(&samples[start..start + take]);
                    // 数据耗尽后补零，由外层循环收尾
                    for sample in &mut out[take..] {
                        *sample = 0.0;
                    }
                    position.store(start + take, Ordering::Relaxed);
                    if take < out.len() {
                        done.store(true, Ordering::Release);
                    }
                },
                |err| tracing::warn!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioOutputError::Device(e.to_string()))?
    };

    stream
        .play()
        .map_err(|e| AudioOutputError::Device(e.to_string()))?;

    while !done.load(Ordering::Acquire) && !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(20));
    }

    // 设备缓冲排空
    if !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(100));
    }

    Ok(())
}
