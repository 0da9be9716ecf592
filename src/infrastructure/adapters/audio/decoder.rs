//! Audio Decoder - 基于 symphonia 的音频解码
//!
//! 将服务端返回的压缩音频（MPEG/WAV）解码为交织 f32 PCM

use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::AudioOutputError;

/// 解码后的 PCM 音频
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// 交织的 f32 样本
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u8,
    /// 音频时长（毫秒）
    pub duration_ms: u64,
}

/// 解码音频字节为 PCM
///
/// 容器格式由内容探测决定，不依赖文件扩展名
pub fn decode_to_pcm(data: &[u8]) -> Result<DecodedAudio, AudioOutputError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let hint = Hint::new();
    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| AudioOutputError::Decode(format!("Probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| AudioOutputError::Decode("No audio track found".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AudioOutputError::Decode("Unknown sample rate".to_string()))?;

    let channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u8)
        .ok_or_else(|| AudioOutputError::Decode("Unknown channel count".to_string()))?;

    let decoder_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|e| AudioOutputError::Decode(format!("Decoder creation failed: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let track_id = track.id;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(AudioOutputError::Decode(format!("Packet read error: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Decode error (skipping packet): {}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        // Only take the actual samples, not the entire buffer capacity
        let actual_samples = num_frames * spec.channels.count();
        samples.extend(&sample_buf.samples()[..actual_samples]);
    }

    if samples.is_empty() {
        return Err(AudioOutputError::Decode(
            "No decodable audio frames".to_string(),
        ));
    }

    let duration_ms = if sample_rate > 0 && channels > 0 {
        (samples.len() as u64 * 1000) / (sample_rate as u64 * channels as u64)
    } else {
        0
    };

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
        duration_ms,
    })
}
