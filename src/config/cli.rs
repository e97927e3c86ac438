use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the docintel binary.
#[derive(Debug, Parser)]
#[command(
    name = "docintel",
    version,
    about = "Submit documents for AI analysis and render the reports"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "DOCINTEL_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    /// Bearer token from the environment. The flag form stays hidden so
    /// tokens do not end up in shell history.
    #[arg(
        long = "token",
        hide = true,
        env = "DOCINTEL_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token_env: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fetch the catalog of document types and AI models.
    Options,
    /// Submit a document and follow the analysis until it settles.
    Analyze(AnalyzeArgs),
    /// Query the status of an analysis task once.
    Status(StatusArgs),
    /// Render a saved result payload.
    Render(RenderArgs),
    /// Write the PDF report for a saved result payload.
    Export(ExportArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the analysis service base URL.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Read the bearer token from this file (takes precedence over DOCINTEL_TOKEN).
    #[arg(
        long = "token-file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub token_file: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Force JSON logging output when set to true.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the delay between status queries, in milliseconds.
    #[arg(long = "poll-interval-ms", value_name = "MILLIS", global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Override the number of status queries before giving up (0 = unbounded).
    #[arg(long = "poll-max-attempts", value_name = "COUNT", global = true)]
    pub poll_max_attempts: Option<u64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct AnalyzeArgs {
    /// Document to analyze.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Context text sent alongside the document.
    #[arg(long, value_name = "TEXT", conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read the context text from a file.
    #[arg(long = "context-file", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub context_file: Option<PathBuf>,

    /// Document type id; defaults to the first entry of the catalog.
    #[arg(long = "document-type", value_name = "ID")]
    pub document_type: Option<String>,

    /// AI model id; defaults to the first entry of the catalog.
    #[arg(long, value_name = "ID")]
    pub model: Option<String>,

    /// Output format for the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Also write the PDF report.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub pdf: bool,

    /// Directory the PDF report is written to.
    #[arg(long = "out-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct StatusArgs {
    /// Task id returned by a previous submission.
    #[arg(value_name = "TASK_ID")]
    pub task_id: String,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Result payload saved as JSON.
    #[arg(value_name = "RESULT_JSON", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Output format for the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Result payload saved as JSON.
    #[arg(value_name = "RESULT_JSON", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Directory the PDF report is written to.
    #[arg(long = "out-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}
