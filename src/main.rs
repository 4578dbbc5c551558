use anyhow::Context;
use tracing::info;

use gpt_reviewer::{
    Cli, ClientConfig, OpenAiClient, ReportTemplate, SystemEnvProvider, logging, run_review,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbosity())?;

    info!("Creating OpenAI client");
    let client = OpenAiClient::new(ClientConfig::from_env(&SystemEnvProvider))
        .context("Failed to create OpenAI client")?;

    run_review(
        &cli.input_file,
        &cli.output_path,
        &client,
        &ReportTemplate::bundled(),
    )
    .await
    .with_context(|| format!("Failed to review {}", cli.input_file.display()))?;

    Ok(())
}
