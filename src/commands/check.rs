// Check command - validate CITE reports

use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::resolve_suite_identifier;
use crate::cli::args::CheckArgs;
use crate::config::Config;
use crate::diagnostics::{
    COUNTER_MISMATCH, CheckReport, Diagnostic, FILE_NOT_FOUND, PARSE_ERROR,
    UNCLASSIFIED_TEST_CASE,
};
use crate::model::audit;
use crate::parsers;
use crate::utils::FileUtils;

pub fn handle_check(args: &CheckArgs, config: &Config) -> Result<()> {
    let mut files = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut files_with_errors = 0;

    for path in &args.paths {
        if path.exists() {
            files.extend(FileUtils::collect_report_files(path));
        } else {
            diagnostics.push(Diagnostic::error(
                &path.to_string_lossy(),
                FILE_NOT_FOUND,
                "Path not found",
            ));
            files_with_errors += 1;
        }
    }

    info!("Checking {} report(s)...", files.len());

    let treat_skipped_as_failure =
        args.treat_skipped_as_failure || config.general.treat_skipped_as_failure;

    for file in &files {
        let file_diagnostics = check_report(file, config, treat_skipped_as_failure);
        let file_has_error = file_diagnostics.iter().any(Diagnostic::is_error);
        if file_has_error {
            files_with_errors += 1;
        } else if !args.is_json() && file_diagnostics.is_empty() {
            println!("{} ... OK", file.display());
        }
        diagnostics.extend(file_diagnostics);
    }

    if args.is_json() {
        let report = CheckReport::new(diagnostics, files.len(), files_with_errors);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for d in &diagnostics {
            println!("{}: [{}] {}", d.file, d.code, d.message);
            if let Some(hint) = &d.hint {
                println!("  hint: {}", hint);
            }
        }
    }

    if files_with_errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Normalize one report the way `parse` would and collect what looks wrong
fn check_report(file: &Path, config: &Config, treat_skipped_as_failure: bool) -> Vec<Diagnostic> {
    let file_str = file.to_string_lossy().to_string();

    let raw = match FileUtils::read_file(file) {
        Ok(raw) => raw,
        Err(e) => return vec![Diagnostic::error(&file_str, PARSE_ERROR, &format!("{:#}", e))],
    };
    let document = match parsers::parse_document(&raw) {
        Ok(document) => document,
        Err(e) => {
            return vec![
                Diagnostic::error(&file_str, PARSE_ERROR, &e.to_string()).with_hint(e.code()),
            ];
        }
    };
    let suite_identifier = match resolve_suite_identifier(&document, None) {
        Ok(id) => id,
        Err(e) => return vec![Diagnostic::error(&file_str, PARSE_ERROR, &e.to_string())],
    };

    let dispatch = config.dispatch.resolve(&suite_identifier);
    let suite = match dispatch
        .parser
        .parser()
        .parse(&document, treat_skipped_as_failure)
    {
        Ok(suite) => suite,
        Err(e) => {
            return vec![
                Diagnostic::error(&file_str, PARSE_ERROR, &e.to_string()).with_hint(&format!(
                    "{} (suite '{}' uses the {} parser)",
                    e.code(),
                    suite_identifier,
                    dispatch.parser
                )),
            ];
        }
    };

    let mut diagnostics: Vec<Diagnostic> = suite
        .unclassified_test_cases()
        .iter()
        .map(|case| {
            Diagnostic::warning(
                &file_str,
                UNCLASSIFIED_TEST_CASE,
                &format!(
                    "Test case {} is not part of any conformance class",
                    case.identifier()
                ),
            )
        })
        .collect();

    diagnostics.extend(audit(&suite).into_iter().map(|mismatch| {
        Diagnostic::warning(&file_str, COUNTER_MISMATCH, &mismatch.to_string())
    }));

    diagnostics
}
