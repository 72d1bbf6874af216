// Markdown serializer - human-readable suite summary

use std::fmt::Write;

use anyhow::Result;

use super::{Serializer, SerializerKind};
use crate::model::{ConformanceClassResult, SuiteResult, TestCaseResult, TestStatus};
use crate::time::format_duration;

/// Markdown renderer; `Detailed` also lists every test case
#[derive(Debug, Clone, Copy)]
pub struct MarkdownSerializer {
    kind: SerializerKind,
}

impl MarkdownSerializer {
    pub fn new(kind: SerializerKind) -> Self {
        Self { kind }
    }
}

impl Serializer for MarkdownSerializer {
    fn serialize(&self, suite: &SuiteResult) -> Result<String> {
        let mut md = String::new();

        writeln!(md, "# {}", suite.title())?;
        writeln!(md)?;
        writeln!(md, "- **Suite:** `{}`", suite.identifier())?;
        writeln!(md, "- **Result:** {}", outcome_label(suite.passed()))?;
        writeln!(md, "- **Started:** {}", suite.test_run_start().to_rfc3339())?;
        writeln!(
            md,
            "- **Duration:** {}",
            format_duration(suite.test_run_duration())
        )?;
        writeln!(
            md,
            "- **Tests:** {} total, {} passed, {} failed, {} skipped",
            suite.num_tests_total(),
            suite.num_passed_tests(),
            suite.num_failed_tests(),
            suite.num_skipped_tests()
        )?;

        if !suite.inputs().is_empty() {
            writeln!(md)?;
            writeln!(md, "## Inputs")?;
            writeln!(md)?;
            writeln!(md, "| Name | Value |")?;
            writeln!(md, "| --- | --- |")?;
            for input in suite.inputs() {
                writeln!(md, "| {} | {} |", cell(&input.name), cell(&input.value))?;
            }
        }

        writeln!(md)?;
        writeln!(md, "## Conformance classes")?;
        writeln!(md)?;
        if suite.conformance_classes().is_empty() {
            writeln!(md, "_No conformance classes were reported._")?;
        } else {
            writeln!(md, "| Conformance class | Result | Passed | Failed | Skipped | Total |")?;
            writeln!(md, "| --- | --- | ---: | ---: | ---: | ---: |")?;
            for class in suite.conformance_classes() {
                writeln!(
                    md,
                    "| {} | {} | {} | {} | {} | {} |",
                    cell(class.title()),
                    outcome_label(class.passed()),
                    class.num_passed_tests(),
                    class.num_failed_tests(),
                    class.num_skipped_tests(),
                    class.num_tests_total()
                )?;
            }
        }

        write_case_section(&mut md, "Failed tests", suite, TestStatus::Failed)?;
        write_case_section(&mut md, "Skipped tests", suite, TestStatus::Skipped)?;

        if !suite.unclassified_test_cases().is_empty() {
            writeln!(md)?;
            writeln!(md, "## Unclassified tests")?;
            writeln!(md)?;
            for case in suite.unclassified_test_cases() {
                write_case(&mut md, case)?;
            }
        }

        if self.kind == SerializerKind::Detailed {
            write_all_cases(&mut md, suite.conformance_classes())?;
        }

        Ok(md)
    }
}

/// Failed or skipped cases grouped by conformance class; omitted when there are none
fn write_case_section(
    md: &mut String,
    heading: &str,
    suite: &SuiteResult,
    status: TestStatus,
) -> std::fmt::Result {
    if !suite.test_cases().any(|c| c.status() == status) {
        return Ok(());
    }

    writeln!(md)?;
    writeln!(md, "## {}", heading)?;
    for class in suite.conformance_classes() {
        let cases: Vec<&TestCaseResult> =
            class.test_cases().filter(|c| c.status() == status).collect();
        if cases.is_empty() {
            continue;
        }
        writeln!(md)?;
        writeln!(md, "### {}", class.title())?;
        writeln!(md)?;
        for case in cases {
            write_case(md, case)?;
        }
    }
    Ok(())
}

fn write_all_cases(md: &mut String, classes: &[ConformanceClassResult]) -> std::fmt::Result {
    writeln!(md)?;
    writeln!(md, "## All tests")?;
    for class in classes {
        writeln!(md)?;
        writeln!(md, "### {} {}", status_icon_for(class.passed()), class.title())?;
        if let Some(description) = class.description() {
            writeln!(md)?;
            writeln!(md, "{}", description)?;
        }
        for category in class.categories() {
            writeln!(md)?;
            writeln!(md, "#### {}", category.short_name())?;
            writeln!(md)?;
            if category.test_cases().is_empty() {
                writeln!(md, "_No test cases._")?;
            }
            for case in category.test_cases() {
                write_case(md, case)?;
            }
        }
    }
    Ok(())
}

fn write_case(md: &mut String, case: &TestCaseResult) -> std::fmt::Result {
    write!(md, "- {} **{}**", status_icon(case.status()), case.name())?;
    if !case.parameters().is_empty() {
        write!(md, " ({})", case.parameters().join(", "))?;
    }
    writeln!(md)?;
    if !case.description().is_empty() {
        writeln!(md, "  - {}", case.description())?;
    }
    if let Some(detail) = case.detail() {
        for line in detail.lines().filter(|l| !l.trim().is_empty()) {
            writeln!(md, "  > {}", line.trim_end())?;
        }
    }
    Ok(())
}

fn status_icon(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Passed => "✅",
        TestStatus::Failed => "❌",
        TestStatus::Skipped => "⏭️",
    }
}

fn status_icon_for(passed: bool) -> &'static str {
    if passed { "✅" } else { "❌" }
}

fn outcome_label(passed: bool) -> &'static str {
    if passed { "✅ passed" } else { "❌ failed" }
}

/// Escape a value for use inside a table cell
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
