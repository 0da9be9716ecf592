//! Audio Adapter - 音频解码与播放实现

mod cpal_output;
mod decoder;
mod null_output;

pub use cpal_output::CpalAudioOutput;
pub use decoder::{decode_to_pcm, DecodedAudio};
pub use null_output::NullAudioOutput;
