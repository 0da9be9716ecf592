//! Pdfvox - PDF 问答语音客户端
//!
//! 收集 PDF 文件与查询文本，通过一次 multipart POST 提交到远程分析服务，
//! 以文本显示回答并播放回答音频

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use pdfvox::application::ports::AudioOutputPort;
use pdfvox::application::{SubmitQuestion, SubmitQuestionHandler};
use pdfvox::config::{load_config, load_config_from_path, print_config};
use pdfvox::domain::submission::UploadFile;
use pdfvox::infrastructure::adapters::{
    ConsoleView, CpalAudioOutput, HttpAnswerClient, HttpAnswerClientConfig, NullAudioOutput,
};
// use pdfvox::infrastructure::adapters::{FakeAnswerClient, FakeAnswerClientConfig};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(
    name = "pdfvox",
    about = "Ask questions about PDF documents and hear the answer"
)]
struct Cli {
    /// 要提交的 PDF 文件
    #[arg(value_name = "PDF")]
    files: Vec<PathBuf>,

    /// 查询文本
    #[arg(short, long, default_value = "")]
    query: String,

    /// 配置文件路径
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 禁用音频播放
    #[arg(long)]
    no_audio: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path)),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},pdfvox={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    // 读取上传文件，本地读取失败在提交开始前报告
    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.pdf")
            .to_string();
        let mime = UploadFile::mime_from_filename(&filename);
        files.push(UploadFile::new(filename, mime, bytes));
    }

    // 创建 HTTP 问答客户端
    let service = Arc::new(HttpAnswerClient::new(HttpAnswerClientConfig::new(
        config.service.base_url(),
    ))?);

    // // 使用 Fake 问答客户端（离线联调，始终返回固定回答）
    // let service = Arc::new(FakeAnswerClient::with_defaults()?);

    // 音频输出
    let audio: Arc<dyn AudioOutputPort> = if config.audio.enabled && !cli.no_audio {
        Arc::new(CpalAudioOutput::new())
    } else {
        Arc::new(NullAudioOutput)
    };

    let view = Arc::new(ConsoleView::new());

    let handler = SubmitQuestionHandler::new(service, audio, view);

    let result = handler
        .handle(SubmitQuestion {
            files,
            query: cli.query,
        })
        .await;

    // 失败已通过阻塞式通知反馈给用户，这里仅设置退出码
    if result.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
