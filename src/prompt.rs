//! Fixed prompt sent with every review request.

use crate::chat::{ChatCompletionRequest, ChatMessage};

/// Model every review is requested from
pub const REVIEW_MODEL: &str = "gpt-3.5-turbo";

/// Natural language the review is written in
pub const REVIEW_LANGUAGE: &str = "English";

/// XML layout the model is asked to answer with
pub const REVIEW_TEMPLATE: &str = r#"
<CodeReview>
    <GeneralObservations>
        <Observation>
            General observations about the code's structure, style, programming practices, etc.
        </Observation>
        <!-- Additional general observations can be added here -->
    </GeneralObservations>
    <SpecificComments>
        <Comment>
            <Location> Specify the particular line or section of the code </Location>
            <Feedback>
                Detailed comment regarding the specific line or section of the code
            </Feedback>
        </Comment>
        <!-- Additional specific comments can be added here -->
    </SpecificComments>
    <ImprovementSuggestions>
        <Suggestion>
            Specific suggestions for improving the code
        </Suggestion>
        <!-- Additional suggestions for improvements can be added here -->
    </ImprovementSuggestions>
</CodeReview>
"#;

pub fn system_prompt() -> String {
    format!(
        "You are a program that reviews code and returns feedback in the specified XML format, \
         including specific examples of issues. Please use the provided XML template for your \
         response. The language of the review should be: {REVIEW_LANGUAGE}. \
         The XML template is: ```{REVIEW_TEMPLATE}```"
    )
}

/// System instruction plus the numbered file content as the user turn.
pub fn build_request(numbered_content: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: REVIEW_MODEL.to_string(),
        messages: vec![
            ChatMessage::system(system_prompt()),
            ChatMessage::user(numbered_content),
        ],
    }
}
