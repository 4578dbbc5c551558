use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gpt_reviewer::{ChatCompletionRequest, ChatService, ReviewError};

/// Canned outcome for one `complete` call
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    Status(u16),
}

/// Chat service that replays canned replies and records every request
pub struct RecordingChatService {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl RecordingChatService {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![MockReply::Text(text.to_string())])
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatService for RecordingChatService {
    async fn complete(&self, request: &ChatCompletionRequest) -> gpt_reviewer::error::Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no canned reply left");

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Status(status) => Err(ReviewError::HttpStatus {
                url: "http://mock/v1/chat/completions".to_string(),
                status,
                message: format!("mock status {status}"),
            }),
        }
    }
}
