//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 问答服务配置
    #[serde(default)]
    pub service: ServiceConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            audio: AudioConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 问答服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// 分析服务基础 URL（查询路径 /api/query 由客户端拼接）
    #[serde(default = "default_service_url")]
    pub url: String,
}

fn default_service_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
        }
    }
}

impl ServiceConfig {
    /// 获取规范化的基础 URL（去除尾部斜杠）
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// 音频配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// 是否播放回答音频
    #[serde(default = "default_audio_enabled")]
    pub enabled: bool,
}

fn default_audio_enabled() -> bool {
    true
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_audio_enabled(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
