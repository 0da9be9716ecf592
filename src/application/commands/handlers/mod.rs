//! Command Handlers

mod submission_handlers;

pub use submission_handlers::{SubmitQuestionHandler, SubmitQuestionResponse};
