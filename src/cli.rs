use clap::Parser;
use std::path::PathBuf;

/// Verbosity levels for log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// Progress lines and errors
    #[default]
    Normal,
    /// Everything above plus debug diagnostics
    Verbose,
}

/// Review code using GPT
#[derive(Parser, Debug, Clone)]
#[command(name = "gpt-reviewer")]
#[command(about = "Review code using GPT and write the review as an HTML report")]
#[command(version)]
pub struct Cli {
    /// Path to file to review
    #[arg(short = 'i', long = "input_file", value_name = "PATH")]
    pub input_file: PathBuf,

    /// Path to output directory
    #[arg(short = 'o', long = "output_path", value_name = "DIR")]
    pub output_path: PathBuf,

    /// Increase output verbosity to debug
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}
