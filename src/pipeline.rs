//! Review pipeline
//!
//! `Start -> Loaded -> Reviewed -> Rendered -> Written`, strictly in that
//! order. Any error aborts the run from whatever stage it occurs in; nothing
//! is written unless rendering succeeded.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::chat::ChatService;
use crate::error::Result;
use crate::loader::load_numbered_file;
use crate::render::{ReportRenderer, ReportTemplate};
use crate::review::{ReviewCounts, ReviewDocument};
use crate::reviewer::request_review;
use crate::writer::write_report;

/// Stages a run passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Start,
    Loaded,
    Reviewed,
    Rendered,
    Written,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::Loaded => "loaded",
            PipelineStage::Reviewed => "reviewed",
            PipelineStage::Rendered => "rendered",
            PipelineStage::Written => "written",
        };
        f.write_str(name)
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub report_path: PathBuf,
    pub reviewed_lines: usize,
    pub counts: ReviewCounts,
}

/// Review `input_file` and write the HTML report into `output_dir`.
pub async fn run_review(
    input_file: &Path,
    output_dir: &Path,
    service: &dyn ChatService,
    template: &ReportTemplate,
) -> Result<ReviewOutcome> {
    debug!(stage = %PipelineStage::Start, input = %input_file.display());
    info!("Getting file content");
    let source = load_numbered_file(input_file).await?;
    debug!(stage = %PipelineStage::Loaded, lines = source.line_count);

    info!("Getting review");
    let reply = request_review(&source.content, service).await?;
    debug!(stage = %PipelineStage::Reviewed);

    info!("Generating report");
    let review = ReviewDocument::parse(&reply)?;
    let html = ReportRenderer::new(template).render(&review);
    debug!(stage = %PipelineStage::Rendered, bytes = html.len());

    let report_path = write_report(&html, output_dir).await?;
    debug!(stage = %PipelineStage::Written);

    info!("Done");
    Ok(ReviewOutcome {
        report_path,
        reviewed_lines: source.line_count,
        counts: review.counts(),
    })
}
