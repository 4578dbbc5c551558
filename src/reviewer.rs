use tracing::debug;

use crate::chat::ChatService;
use crate::error::Result;
use crate::prompt;

/// Ask the chat service to review `numbered_content` and return its reply
/// verbatim. One request, no retry.
pub async fn request_review(numbered_content: &str, service: &dyn ChatService) -> Result<String> {
    let request = prompt::build_request(numbered_content);
    debug!(
        model = %request.model,
        user_bytes = numbered_content.len(),
        "Requesting review"
    );

    let reply = service.complete(&request).await?;
    debug!(reply_bytes = reply.len(), "Review received");
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MockChatService;
    use crate::error::ReviewError;

    #[tokio::test]
    async fn test_sends_prompt_and_returns_reply() {
        let mut service = MockChatService::new();
        service
            .expect_complete()
            .withf(|request| {
                request.model == prompt::REVIEW_MODEL
                    && request.messages.len() == 2
                    && request.messages[0].role == "system"
                    && request.messages[1].role == "user"
                    && request.messages[1].content == "1: a\n2: b\n"
            })
            .times(1)
            .returning(|_| Ok("<CodeReview/>".to_string()));

        let reply = request_review("1: a\n2: b\n", &service).await.unwrap();
        assert_eq!(reply, "<CodeReview/>");
    }

    #[tokio::test]
    async fn test_propagates_service_error() {
        let mut service = MockChatService::new();
        service
            .expect_complete()
            .times(1)
            .returning(|_| Err(ReviewError::EmptyCompletion));

        let err = request_review("1: a\n", &service).await.unwrap_err();
        assert!(matches!(err, ReviewError::EmptyCompletion));
    }
}
