//! End-to-end pipeline tests against a recording chat service

mod common;

use common::mocks::{MockReply, RecordingChatService};
use common::test_helpers::{Workspace, review_xml, section_items};
use gpt_reviewer::{ReportTemplate, ReviewError, prompt, run_review};

#[tokio::test]
async fn test_review_written_to_output_dir() {
    let workspace = Workspace::new();
    let input = workspace.write_source("input.txt", "a\nb\n");
    let service = RecordingChatService::replying(&review_xml(&["Good naming"], &[], &["Add tests"]));

    let outcome = run_review(
        &input,
        &workspace.output_dir(),
        &service,
        &ReportTemplate::bundled(),
    )
    .await
    .unwrap();

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, prompt::REVIEW_MODEL);
    assert_eq!(requests[0].messages[0].content, prompt::system_prompt());
    assert_eq!(requests[0].messages[1].content, "1: a\n2: b\n");

    assert_eq!(
        outcome.report_path,
        workspace.output_dir().join("code_review.html")
    );
    let html = std::fs::read_to_string(&outcome.report_path).unwrap();
    assert_eq!(section_items(&html, "General Observations"), "<li>Good naming</li>");
    assert_eq!(section_items(&html, "Improvement Suggestions"), "<li>Add tests</li>");
}

#[tokio::test]
async fn test_missing_input_makes_no_request() {
    let workspace = Workspace::new();
    let service = RecordingChatService::new(vec![]);

    let err = run_review(
        &workspace.path().join("missing.rs"),
        &workspace.output_dir(),
        &service,
        &ReportTemplate::bundled(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReviewError::FileNotFound { .. }));
    assert_eq!(service.request_count(), 0);
    assert!(!workspace.output_dir().exists());
}

#[tokio::test]
async fn test_service_failure_aborts_run() {
    let workspace = Workspace::new();
    let input = workspace.write_source("input.txt", "a\n");
    let service = RecordingChatService::new(vec![MockReply::Status(429)]);

    let err = run_review(
        &input,
        &workspace.output_dir(),
        &service,
        &ReportTemplate::bundled(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReviewError::HttpStatus { status: 429, .. }));
    assert_eq!(service.request_count(), 1);
    assert!(!workspace.output_dir().exists());
}

#[tokio::test]
async fn test_wrong_shape_writes_nothing() {
    let workspace = Workspace::new();
    let input = workspace.write_source("input.txt", "a\n");
    let service = RecordingChatService::replying(
        "<CodeReview><GeneralObservations/><SpecificComments>\
         <Comment><Location>Line 1</Location></Comment>\
         </SpecificComments><ImprovementSuggestions/></CodeReview>",
    );

    let err = run_review(
        &input,
        &workspace.output_dir(),
        &service,
        &ReportTemplate::bundled(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReviewError::UnexpectedShape { .. }));
    assert!(!workspace.output_dir().join("code_review.html").exists());
}

#[tokio::test]
async fn test_second_run_overwrites_report() {
    let workspace = Workspace::new();
    let input = workspace.write_source("input.txt", "a\n");
    let service = RecordingChatService::new(vec![
        MockReply::Text(review_xml(&["First run observation"], &[], &[])),
        MockReply::Text(review_xml(&[], &[("Line 1", "Second run comment")], &[])),
    ]);
    let template = ReportTemplate::bundled();

    run_review(&input, &workspace.output_dir(), &service, &template)
        .await
        .unwrap();
    let outcome = run_review(&input, &workspace.output_dir(), &service, &template)
        .await
        .unwrap();

    let html = std::fs::read_to_string(outcome.report_path).unwrap();
    assert!(!html.contains("First run observation"));
    assert!(html.contains("<li><strong>Line 1:</strong> Second run comment</li>"));
    assert_eq!(service.request_count(), 2);
}
