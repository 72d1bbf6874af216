// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Normalize OGC CITE conformance test reports
#[derive(Parser, Debug)]
#[command(name = "cite-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Turn OGC CITE test reports into JSON or markdown summaries",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion script (bash, zsh, fish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a report and print it in the requested format
    Parse(ParseArgs),

    /// Validate reports and list problems found while normalizing them
    Check(CheckArgs),

    /// Show the detected dialect and dispatch decision for a report
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Report file to parse
    #[arg(required = true)]
    pub report: PathBuf,

    /// Output format (defaults to the configured output format)
    #[arg(long, value_parser = ["json", "markdown", "raw"])]
    pub format: Option<String>,

    /// Suite identifier; derived from the report's suite name when omitted
    #[arg(long, value_name = "SUITE_ID")]
    pub suite: Option<String>,

    /// Force a parser instead of the configured one for this suite
    #[arg(long, value_parser = ["flat", "earl"])]
    pub parser: Option<String>,

    /// Force a markdown style instead of the configured one for this suite
    #[arg(long, value_parser = ["summary", "detailed"])]
    pub serializer: Option<String>,

    /// Count skipped test cases as failures
    #[arg(long, default_value_t = false)]
    pub treat_skipped_as_failure: bool,

    /// Exit with status 1 if the suite did not pass
    #[arg(long, default_value_t = false)]
    pub exit_with_error_on_failure: bool,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Report files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Count skipped test cases as failures
    #[arg(long, default_value_t = false)]
    pub treat_skipped_as_failure: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Report file to inspect
    #[arg(required = true)]
    pub report: PathBuf,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

fn is_json_format(value: &str) -> bool {
    value.eq_ignore_ascii_case("json")
}

impl CheckArgs {
    pub fn is_json(&self) -> bool {
        is_json_format(&self.format)
    }
}

impl InspectArgs {
    pub fn is_json(&self) -> bool {
        is_json_format(&self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_flags() {
        let cli = Cli::try_parse_from([
            "cite-report",
            "parse",
            "report.xml",
            "--format",
            "json",
            "--suite",
            "wfs20",
            "--treat-skipped-as-failure",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Parse(args)) => {
                assert_eq!(args.format.as_deref(), Some("json"));
                assert_eq!(args.suite.as_deref(), Some("wfs20"));
                assert!(args.treat_skipped_as_failure);
                assert!(!args.exit_with_error_on_failure);
                assert!(args.parser.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["cite-report", "parse", "r.xml", "--format", "html"]).is_err());
    }

    #[test]
    fn test_check_requires_paths() {
        assert!(Cli::try_parse_from(["cite-report", "check"]).is_err());
    }
}
