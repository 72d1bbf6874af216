// Parse command - normalize one report and serialize it

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{info, warn};

use super::suite_identifier_for;
use crate::cli::args::ParseArgs;
use crate::config::Config;
use crate::parsers::{self, ParserKind};
use crate::serializers::{self, OutputFormat, SerializerKind};
use crate::utils::FileUtils;

/// Settings for one parse run after merging flags, config file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ParseSettings {
    /// `None` when the report declares no suite name and `--suite` was not given
    pub suite_identifier: Option<String>,
    pub parser: ParserKind,
    pub serializer: SerializerKind,
    pub format: OutputFormat,
    pub treat_skipped_as_failure: bool,
    pub exit_with_error_on_failure: bool,
}

impl ParseSettings {
    pub fn resolve(
        args: &ParseArgs,
        config: &Config,
        suite_identifier: Option<String>,
    ) -> Result<Self> {
        let dispatch = suite_identifier
            .as_deref()
            .map(|suite| config.dispatch.resolve(suite));

        let parser = match (&args.parser, &dispatch) {
            (Some(p), _) => p.parse::<ParserKind>().map_err(anyhow::Error::msg)?,
            (None, Some(dispatch)) => dispatch.parser,
            (None, None) => anyhow::bail!(
                "Report does not declare a suite name; pass --suite or --parser to pick one"
            ),
        };
        let serializer = match (&args.serializer, &dispatch) {
            (Some(s), _) => s.parse::<SerializerKind>().map_err(anyhow::Error::msg)?,
            (None, Some(dispatch)) => dispatch.serializer,
            (None, None) => config.dispatch.default_serializer,
        };
        let format = match &args.format {
            Some(f) => f.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
            None => config.general.output_format,
        };

        Ok(Self {
            suite_identifier,
            parser,
            serializer,
            format,
            treat_skipped_as_failure: args.treat_skipped_as_failure
                || config.general.treat_skipped_as_failure,
            exit_with_error_on_failure: args.exit_with_error_on_failure
                || config.general.exit_with_error_on_failure,
        })
    }
}

pub fn handle_parse(args: &ParseArgs, config: &Config) -> Result<()> {
    let raw = FileUtils::read_file(&args.report)?;
    let document = parsers::parse_document(&raw)
        .with_context(|| format!("Failed to load report {}", args.report.display()))?;

    let suite_identifier = suite_identifier_for(&document, args.suite.as_deref());
    let settings = ParseSettings::resolve(args, config, suite_identifier)?;

    let suite = settings
        .parser
        .parser()
        .parse(&document, settings.treat_skipped_as_failure)
        .with_context(|| {
            format!(
                "Failed to parse {} with the {} parser",
                args.report.display(),
                settings.parser
            )
        })?;
    info!(
        "Suite {} {}: {} test case(s), {} failed, {} skipped",
        suite.identifier(),
        if suite.passed() { "passed" } else { "failed" },
        suite.num_tests_total(),
        suite.num_failed_tests(),
        suite.num_skipped_tests()
    );

    let mut output = serializers::render(&suite, &raw, settings.format, settings.serializer)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &args.output {
        Some(path) => {
            FileUtils::write_file(path, &output)?;
            info!("Wrote {} output to {}", settings.format, path.display());
        }
        None => print!("{}", output),
    }

    if settings.exit_with_error_on_failure && !suite.passed() {
        warn!("Suite {} did not pass", suite.identifier());
        std::io::stdout().flush()?;
        std::process::exit(1);
    }

    Ok(())
}
