//! Submission Command Handlers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::SubmitQuestion;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AnswerRequest, AnswerServiceError, AnswerServicePort, AudioOutputPort, SubmissionViewPort,
};
use crate::domain::submission::{AnswerResult, Query, UploadSet};

/// 校验失败的用户提示，与原页面文案一致
const MSG_NO_FILES: &str = "Please upload at least one PDF.";
const MSG_EMPTY_QUERY: &str = "Please enter a question.";

// ============================================================================
// SubmitQuestion
// ============================================================================

/// 提交问答响应
#[derive(Debug, Clone)]
pub struct SubmitQuestionResponse {
    pub answer_text: String,
    pub audio_played: bool,
}

/// SubmitQuestion Handler
///
/// 一次提交的完整编排:
/// 校验 → 占用提交槽 → 隐藏旧结果 → 请求 → 渲染或通知 → 恢复控件
///
/// 状态机: Idle → Validating → Submitting → Idle，周期之间不保留状态
pub struct SubmitQuestionHandler {
    service: Arc<dyn AnswerServicePort>,
    audio: Arc<dyn AudioOutputPort>,
    view: Arc<dyn SubmissionViewPort>,
    /// 提交进行中标志，并发提交的唯一护栏
    in_flight: AtomicBool,
}

impl SubmitQuestionHandler {
    pub fn new(
        service: Arc<dyn AnswerServicePort>,
        audio: Arc<dyn AudioOutputPort>,
        view: Arc<dyn SubmissionViewPort>,
    ) -> Self {
        Self {
            service,
            audio,
            view,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn handle(
        &self,
        command: SubmitQuestion,
    ) -> Result<SubmitQuestionResponse, ApplicationError> {
        // 前置校验先于占用提交槽，失败的提交不会触碰控件状态或网络
        let uploads = match UploadSet::new(command.files) {
            Ok(uploads) => uploads,
            Err(e) => {
                self.view.notify(MSG_NO_FILES);
                return Err(ApplicationError::validation(e.to_string()));
            }
        };
        let query = match Query::new(&command.query) {
            Ok(query) => query,
            Err(e) => {
                self.view.notify(MSG_EMPTY_QUERY);
                return Err(ApplicationError::validation(e.to_string()));
            }
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ApplicationError::AlreadyInFlight);
        }

        let submission_id = Uuid::new_v4();
        tracing::info!(
            submission_id = %submission_id,
            files = uploads.len(),
            query_len = query.as_str().len(),
            "Submission started"
        );

        self.view.set_busy(true);
        self.view.hide_result();

        let outcome = self.run_submission(submission_id, uploads, query).await;

        // 恢复触发控件并释放提交槽，无论成功或失败
        self.view.set_busy(false);
        self.in_flight.store(false, Ordering::SeqCst);

        outcome
    }

    /// 提交主体，错误通知发生在控件恢复之前
    async fn run_submission(
        &self,
        submission_id: Uuid,
        uploads: UploadSet,
        query: Query,
    ) -> Result<SubmitQuestionResponse, ApplicationError> {
        match self.perform(uploads, query).await {
            Ok(answer) => {
                let text = answer.text().to_string();
                self.view.show_result(&text);

                let audio_played = match answer.audio {
                    Some(data) => {
                        // 播放失败不阻断文本结果，原实现的播放同样是即发即忘
                        match self.audio.play(data).await {
                            Ok(()) => true,
                            Err(e) => {
                                tracing::warn!(
                                    submission_id = %submission_id,
                                    "Audio playback failed: {}",
                                    e
                                );
                                false
                            }
                        }
                    }
                    None => {
                        self.audio.clear().await;
                        false
                    }
                };

                tracing::info!(
                    submission_id = %submission_id,
                    audio_played,
                    "Submission completed"
                );

                Ok(SubmitQuestionResponse {
                    answer_text: text,
                    audio_played,
                })
            }
            Err(error) => {
                tracing::warn!(
                    submission_id = %submission_id,
                    "Submission failed: {}",
                    error
                );
                self.view.notify(&format!("Error: {}", error.user_message()));
                Err(error)
            }
        }
    }

    async fn perform(
        &self,
        uploads: UploadSet,
        query: Query,
    ) -> Result<AnswerResult, ApplicationError> {
        self.service
            .ask(AnswerRequest { uploads, query })
            .await
            .map_err(|e| match e {
                AnswerServiceError::Service(message) => ApplicationError::service(message),
                AnswerServiceError::Network(message)
                | AnswerServiceError::InvalidResponse(message) => {
                    ApplicationError::transport(message)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::UploadFile;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    use crate::application::ports::AudioOutputError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum ViewEvent {
        Busy(bool),
        HideResult,
        ShowResult(String),
        Notify(String),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Mutex<Vec<ViewEvent>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SubmissionViewPort for RecordingView {
        fn set_busy(&self, busy: bool) {
            self.events.lock().unwrap().push(ViewEvent::Busy(busy));
        }

        fn hide_result(&self) {
            self.events.lock().unwrap().push(ViewEvent::HideResult);
        }

        fn show_result(&self, text: &str) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::ShowResult(text.to_string()));
        }

        fn notify(&self, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(ViewEvent::Notify(message.to_string()));
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum AudioEvent {
        Played(Vec<u8>),
        Cleared,
    }

    #[derive(Default)]
    struct RecordingAudio {
        events: Mutex<Vec<AudioEvent>>,
        fail_playback: bool,
    }

    impl RecordingAudio {
        fn failing() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                fail_playback: true,
            }
        }

        fn events(&self) -> Vec<AudioEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AudioOutputPort for RecordingAudio {
        async fn play(&self, data: Vec<u8>) -> Result<(), AudioOutputError> {
            self.events.lock().unwrap().push(AudioEvent::Played(data));
            if self.fail_playback {
                return Err(AudioOutputError::Device("no output device".to_string()));
            }
            Ok(())
        }

        async fn clear(&self) {
            self.events.lock().unwrap().push(AudioEvent::Cleared);
        }
    }

    /// 可编程的问答服务桩
    #[derive(Debug, Clone)]
    enum StubResponse {
        Answer(AnswerResult),
        ServiceError(String),
        NetworkError(String),
    }

    struct StubService {
        response: StubResponse,
        calls: AtomicUsize,
        last_request: Mutex<Option<AnswerRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl StubService {
        fn answering(result: AnswerResult) -> Self {
            Self::new(StubResponse::Answer(result))
        }

        fn new(response: StubResponse) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                gate: None,
            }
        }

        fn gated(result: AnswerResult, gate: Arc<Notify>) -> Self {
            Self {
                response: StubResponse::Answer(result),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                gate: Some(gate),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> Option<AnswerRequest> {
            self.last_request.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnswerServicePort for StubService {
        async fn ask(&self, request: AnswerRequest) -> Result<AnswerResult, AnswerServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.response.clone() {
                StubResponse::Answer(result) => Ok(result),
                StubResponse::ServiceError(message) => Err(AnswerServiceError::Service(message)),
                StubResponse::NetworkError(message) => Err(AnswerServiceError::Network(message)),
            }
        }
    }

    fn pdf(name: &str) -> UploadFile {
        UploadFile::new(name, "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn handler(
        service: Arc<StubService>,
        audio: Arc<RecordingAudio>,
        view: Arc<RecordingView>,
    ) -> SubmitQuestionHandler {
        SubmitQuestionHandler::new(service, audio, view)
    }

    #[tokio::test]
    async fn test_empty_upload_set_never_reaches_the_service() {
        let service = Arc::new(StubService::answering(AnswerResult {
            answer: Some("unused".to_string()),
            audio: None,
        }));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service.clone(), audio, view.clone());

        let result = handler
            .handle(SubmitQuestion {
                files: vec![],
                query: "x".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(service.call_count(), 0);
        assert_eq!(
            view.events(),
            vec![ViewEvent::Notify(
                "Please upload at least one PDF.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_whitespace_query_never_reaches_the_service() {
        let service = Arc::new(StubService::answering(AnswerResult {
            answer: None,
            audio: None,
        }));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service.clone(), audio, view.clone());

        let result = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "   \t ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(service.call_count(), 0);
        assert_eq!(
            view.events(),
            vec![ViewEvent::Notify("Please enter a question.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_successful_submission_renders_text_and_clears_audio() {
        let service = Arc::new(StubService::answering(AnswerResult {
            answer: Some("It is a test.".to_string()),
            audio: None,
        }));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service.clone(), audio.clone(), view.clone());

        let response = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "What is the summary?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.answer_text, "It is a test.");
        assert!(!response.audio_played);

        // 请求载荷: 文件与去除空白后的查询原样到达服务端口
        let request = service.last_request().unwrap();
        assert_eq!(request.uploads.files()[0].filename(), "doc.pdf");
        assert_eq!(request.query.as_str(), "What is the summary?");

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::HideResult,
                ViewEvent::ShowResult("It is a test.".to_string()),
                ViewEvent::Busy(false),
            ]
        );
        assert_eq!(audio.events(), vec![AudioEvent::Cleared]);
    }

    #[tokio::test]
    async fn test_successful_submission_with_audio_starts_playback() {
        let service = Arc::new(StubService::answering(AnswerResult {
            answer: Some("spoken".to_string()),
            audio: Some(vec![1, 2, 3]),
        }));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service, audio.clone(), view);

        let response = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await
            .unwrap();

        assert!(response.audio_played);
        assert_eq!(audio.events(), vec![AudioEvent::Played(vec![1, 2, 3])]);
    }

    #[tokio::test]
    async fn test_missing_answer_field_falls_back_to_placeholder() {
        let service = Arc::new(StubService::answering(AnswerResult {
            answer: None,
            audio: None,
        }));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service, audio, view.clone());

        let response = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.answer_text, "No answer found.");
        assert!(view
            .events()
            .contains(&ViewEvent::ShowResult("No answer found.".to_string())));
    }

    #[tokio::test]
    async fn test_service_error_notifies_then_restores_trigger() {
        let service = Arc::new(StubService::new(StubResponse::ServiceError(
            "parse failure".to_string(),
        )));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service, audio, view.clone());

        let result = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ServiceError(_))));
        // 通知先于控件恢复
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::HideResult,
                ViewEvent::Notify("Error: parse failure".to_string()),
                ViewEvent::Busy(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_network_error_surfaces_as_transport() {
        let service = Arc::new(StubService::new(StubResponse::NetworkError(
            "connection refused".to_string(),
        )));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service, audio, view.clone());

        let result = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::TransportError(_))));
        assert!(view
            .events()
            .contains(&ViewEvent::Notify("Error: connection refused".to_string())));
    }

    #[tokio::test]
    async fn test_playback_failure_does_not_fail_the_submission() {
        let service = Arc::new(StubService::answering(AnswerResult {
            answer: Some("text survives".to_string()),
            audio: Some(vec![9, 9]),
        }));
        let audio = Arc::new(RecordingAudio::failing());
        let view = Arc::new(RecordingView::default());
        let handler = handler(service, audio, view.clone());

        let response = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.answer_text, "text survives");
        assert!(!response.audio_played);
        assert!(view
            .events()
            .contains(&ViewEvent::ShowResult("text survives".to_string())));
    }

    #[tokio::test]
    async fn test_overlapping_submission_is_rejected() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(StubService::gated(
            AnswerResult {
                answer: Some("first".to_string()),
                audio: None,
            },
            gate.clone(),
        ));
        let audio = Arc::new(RecordingAudio::default());
        let view = Arc::new(RecordingView::default());
        let handler = Arc::new(handler(service.clone(), audio, view));

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler
                    .handle(SubmitQuestion {
                        files: vec![pdf("doc.pdf")],
                        query: "q".to_string(),
                    })
                    .await
            })
        };

        // 等待第一次提交占用提交槽
        while service.call_count() == 0 {
            tokio::task::yield_now().await;
        }

        let second = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await;
        assert!(matches!(second, Err(ApplicationError::AlreadyInFlight)));
        assert_eq!(service.call_count(), 1);

        gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.answer_text, "first");

        // 提交槽释放后可再次提交
        gate.notify_one();
        let third = handler
            .handle(SubmitQuestion {
                files: vec![pdf("doc.pdf")],
                query: "q".to_string(),
            })
            .await;
        assert!(third.is_ok());
    }
}
