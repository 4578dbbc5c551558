//! # gpt-reviewer Library
//!
//! Sends a source file to a chat-completion model, asks for a structured XML
//! code review and renders the review as an HTML report.

pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod libxml2;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod review;
pub mod reviewer;
pub mod writer;

pub use chat::{ChatCompletionRequest, ChatMessage, ChatService, OpenAiClient};
pub use cli::{Cli, VerbosityLevel};
pub use config::{ClientConfig, EnvProvider, SystemEnvProvider};
pub use error::{LibXml2Error, ReviewError};
pub use libxml2::{LibXml2Wrapper, ValidationResult, XmlDocument, XmlElement};
pub use loader::{NumberedSource, load_numbered_file};
pub use pipeline::{PipelineStage, ReviewOutcome, run_review};
pub use render::{ReportRenderer, ReportTemplate, TextPolicy, render_report};
pub use review::{ReviewComment, ReviewCounts, ReviewDocument};
pub use reviewer::request_review;
pub use writer::{REPORT_FILE_NAME, write_report};
