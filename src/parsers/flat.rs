// Flat report parser - TestNG-style results
//
// root[total, failed, skipped, passed]
//   suite[name, duration-ms, started-at, finished-at]
//     test[name]            -> conformance class
//       class[name]         -> category
//         test-method[...]  -> test case (unless is-config="true")

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::xml::{child_element, child_elements, count_attribute, text_content};
use super::{ReportParser, Result};
use crate::error::NormalizeError;
use crate::model::{
    CategoryResult, ConformanceClassResult, ResultCounts, SuiteResult, TestCaseResult,
    TestStatus,
};
use crate::time;

/// Upper bound on suffix probes when de-duplicating a test case name
pub const MAX_NAME_PROBES: usize = 10_000;

const ROOT_ELEMENT: &str = "testng-results";

/// Parser for the flat suite/test/class/test-method dialect
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatReportParser;

impl ReportParser for FlatReportParser {
    fn parse(
        &self,
        document: &Document<'_>,
        treat_skipped_as_failure: bool,
    ) -> Result<SuiteResult> {
        let root = document.root_element();
        if !self.accepts(document) {
            return Err(NormalizeError::UnexpectedRoot {
                expected: ROOT_ELEMENT.to_string(),
                found: root.tag_name().name().to_string(),
            });
        }
        let suite_el = child_element(root, "suite")
            .ok_or_else(|| NormalizeError::missing_element("suite", root.tag_name().name()))?;

        let counts = ResultCounts {
            total: count_attribute(root, "total")?,
            failed: count_attribute(root, "failed")?,
            skipped: count_attribute(root, "skipped")?,
            passed: count_attribute(root, "passed")?,
        };

        let suite_name = suite_el.attribute("name").unwrap_or_default();
        let (start, duration) = parse_run_timing(suite_el)?;

        let mut names = NameRegistry::default();
        let conformance_classes = child_elements(suite_el, "test")
            .map(|test_el| parse_conformance_class(test_el, &mut names, treat_skipped_as_failure))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Parsed flat report '{}': {} conformance class(es), {} test case(s)",
            suite_name,
            conformance_classes.len(),
            names.len()
        );

        Ok(
            SuiteResult::new(suite_name, suite_name, start, duration, counts)
                .with_conformance_classes(conformance_classes),
        )
    }

    fn declared_suite_name(&self, document: &Document<'_>) -> Option<String> {
        child_element(document.root_element(), "suite")
            .and_then(|suite| suite.attribute("name"))
            .map(str::to_string)
    }

    fn accepts(&self, document: &Document<'_>) -> bool {
        let root = document.root_element();
        root.tag_name().namespace().is_none()
            && root.tag_name().name() == ROOT_ELEMENT
            && child_element(root, "suite").is_some()
    }
}

/// Start timestamp and duration of the run.
///
/// Missing timing attributes fall back to "now" and a zero duration; values that
/// are present but unreadable are rejected.
fn parse_run_timing(suite_el: Node<'_, '_>) -> Result<(DateTime<Utc>, TimeDelta)> {
    let started_at = optional_timestamp(suite_el, "started-at")?;
    let finished_at = optional_timestamp(suite_el, "finished-at")?;
    let start = started_at.unwrap_or_else(time::now);

    let duration = match suite_el.attribute("duration-ms") {
        Some(raw) => {
            let millis = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| NormalizeError::invalid_value("duration-ms", raw, e.to_string()))?;
            if millis < 0 {
                return Err(NormalizeError::invalid_value(
                    "duration-ms",
                    raw,
                    "duration is negative",
                ));
            }
            TimeDelta::try_milliseconds(millis).ok_or_else(|| {
                NormalizeError::invalid_value("duration-ms", raw, "duration out of range")
            })?
        }
        None => finished_at
            .map(|end| end - start)
            .filter(|d| *d >= TimeDelta::zero())
            .unwrap_or_else(TimeDelta::zero),
    };

    Ok((start, duration))
}

fn optional_timestamp(node: Node<'_, '_>, attribute: &str) -> Result<Option<DateTime<Utc>>> {
    match node.attribute(attribute) {
        None => Ok(None),
        Some(raw) => time::parse_timestamp(raw).map(Some).ok_or_else(|| {
            NormalizeError::invalid_value(attribute, raw, "not an ISO-8601 timestamp")
        }),
    }
}

fn parse_conformance_class(
    test_el: Node<'_, '_>,
    names: &mut NameRegistry,
    treat_skipped_as_failure: bool,
) -> Result<ConformanceClassResult> {
    let categories = child_elements(test_el, "class")
        .map(|class_el| parse_category(class_el, names, treat_skipped_as_failure))
        .collect::<Result<Vec<_>>>()?;

    Ok(ConformanceClassResult::new(
        test_el.attribute("name").unwrap_or_default(),
        categories,
        treat_skipped_as_failure,
    ))
}

fn parse_category(
    class_el: Node<'_, '_>,
    names: &mut NameRegistry,
    treat_skipped_as_failure: bool,
) -> Result<CategoryResult> {
    let name = class_el.attribute("name").unwrap_or_default();

    let mut test_cases = Vec::new();
    for method_el in child_elements(class_el, "test-method") {
        // Config methods never reserve a name, so a later test of the same name keeps it
        if method_el.attribute("is-config") == Some("true") {
            debug!(
                "Ignoring configuration method '{}' in {}",
                method_el.attribute("name").unwrap_or_default(),
                name
            );
            continue;
        }
        test_cases.push(parse_test_method(method_el, names)?);
    }

    Ok(CategoryResult::new(
        name,
        short_category_name(name),
        test_cases,
        treat_skipped_as_failure,
    ))
}

fn parse_test_method(method_el: Node<'_, '_>, names: &mut NameRegistry) -> Result<TestCaseResult> {
    let name = names.claim(method_el.attribute("name").unwrap_or_default())?;
    let status = parse_status(method_el.attribute("status"));
    debug!("Test case {} -> {}", name, status);

    let exception = child_element(method_el, "exception")
        .and_then(|e| child_element(e, "message"))
        .map(text_content);
    let output = child_element(method_el, "reporter-output").map(text_content);
    let parameters = child_element(method_el, "params")
        .map(|params| {
            child_elements(params, "param")
                .map(text_content)
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(TestCaseResult::new(name, status)
        .with_description(method_el.attribute("description").unwrap_or_default())
        .with_detail(exception)
        .with_output(output)
        .with_parameters(parameters))
}

/// `pass` and `skip` (any case) map to their outcome; anything else is a failure
pub fn parse_status(raw: Option<&str>) -> TestStatus {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("pass") => TestStatus::Passed,
        Some("skip") => TestStatus::Skipped,
        Some("fail") => TestStatus::Failed,
        other => {
            warn!("Unrecognized test status {:?}, treating as failure", other);
            TestStatus::Failed
        }
    }
}

/// Part of a dotted category name after the last `.`
pub fn short_category_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, short)| short)
}

/// Names already handed out within one parse call
#[derive(Debug, Default)]
struct NameRegistry {
    seen: HashSet<String>,
}

impl NameRegistry {
    /// Reserve `candidate`, or the first free `candidate-NNN` if it is taken
    fn claim(&mut self, candidate: &str) -> Result<String> {
        let name = unique_name(candidate, &self.seen)?;
        self.seen.insert(name.clone());
        Ok(name)
    }

    fn len(&self) -> usize {
        self.seen.len()
    }
}

fn unique_name(candidate: &str, seen: &HashSet<String>) -> Result<String> {
    if !seen.contains(candidate) {
        return Ok(candidate.to_string());
    }

    (1..=MAX_NAME_PROBES)
        .map(|idx| format!("{}-{:03}", candidate, idx))
        .find(|name| !seen.contains(name))
        .ok_or_else(|| NormalizeError::NameCollision {
            name: candidate.to_string(),
            attempts: MAX_NAME_PROBES,
        })
}
