use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::error::Result;

/// Name of the report inside the output directory
pub const REPORT_FILE_NAME: &str = "code_review.html";

/// Write `html` to `<output_dir>/code_review.html`, creating the directory
/// and its parents when missing. An existing report is overwritten in place.
pub async fn write_report(html: &str, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;

    let output_file = output_dir.join(REPORT_FILE_NAME);
    fs::write(&output_file, html).await?;

    info!("Report saved in {}", output_file.display());
    Ok(output_file)
}
