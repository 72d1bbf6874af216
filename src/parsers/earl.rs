//! EARL report parser.
//!
//! EARL is the W3C Evaluation and Report Language, a vocabulary for expressing
//! test results (<https://www.w3.org/TR/EARL10-Schema>). A report holds one
//! `cite:TestRun` node with the ordered list of `earl:TestRequirement`s, and a
//! flat list of `earl:Assertion`s that refer to test cases only by identifier.
//! The parser resolves which requirement every assertion belongs to.

use std::collections::HashSet;

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::xml::{
    child_element, child_elements, find_path, optional_text, required_child, required_count,
    required_text,
};
use super::{ReportParser, Result};
use crate::error::NormalizeError;
use crate::model::{
    CategoryResult, ConformanceClassResult, ResultCounts, SuiteInput, SuiteResult,
    TestCaseResult, TestStatus,
};
use crate::time;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const EARL_NS: &str = "http://www.w3.org/ns/earl#";
pub const DCT_NS: &str = "http://purl.org/dc/terms/";
pub const CITE_NS: &str = "http://cite.opengeospatial.org/";

/// Parser for W3C EARL/RDF reports
#[derive(Debug, Default, Clone, Copy)]
pub struct EarlReportParser;

/// Requirement shell plus the identifiers of the test cases it declares
struct Requirement {
    title: String,
    description: Option<String>,
    counts: ResultCounts,
    members: HashSet<String>,
}

impl ReportParser for EarlReportParser {
    fn parse(
        &self,
        document: &Document<'_>,
        treat_skipped_as_failure: bool,
    ) -> Result<SuiteResult> {
        let root = document.root_element();
        if !self.accepts(document) {
            return Err(NormalizeError::UnexpectedRoot {
                expected: "rdf:RDF".to_string(),
                found: root.tag_name().name().to_string(),
            });
        }

        let run = required_child(root, (CITE_NS, "TestRun"))?;
        let title = required_text(run, (DCT_NS, "title"))?;
        let identifier = required_text(run, (DCT_NS, "identifier"))?;

        let created = required_text(run, (DCT_NS, "created"))?;
        let start = time::parse_timestamp(&created).ok_or_else(|| {
            NormalizeError::invalid_value("dct:created", &created, "not an ISO-8601 timestamp")
        })?;
        let extent = required_text(run, (DCT_NS, "extent"))?;
        let duration = time::parse_iso8601_duration(&extent).ok_or_else(|| {
            NormalizeError::invalid_value("dct:extent", &extent, "not an ISO-8601 duration")
        })?;

        let counts = parse_counts(run)?;
        let inputs = parse_inputs(run)?;
        let requirements = parse_requirements(run)?;

        let mut linked: Vec<Vec<TestCaseResult>> = vec![Vec::new(); requirements.len()];
        let mut unclassified = Vec::new();
        for assertion_el in child_elements(root, (EARL_NS, "Assertion")) {
            let case = parse_assertion(assertion_el)?;
            match requirements
                .iter()
                .position(|r| r.members.contains(case.identifier()))
            {
                Some(idx) => linked[idx].push(case),
                None => {
                    warn!(
                        "Test case {} is not part of any conformance class",
                        case.identifier()
                    );
                    unclassified.push(case);
                }
            }
        }

        let conformance_classes: Vec<ConformanceClassResult> = requirements
            .into_iter()
            .zip(linked)
            .map(|(requirement, cases)| {
                let category = CategoryResult::new(
                    requirement.title.as_str(),
                    requirement.title.as_str(),
                    cases,
                    treat_skipped_as_failure,
                );
                ConformanceClassResult::new(
                    requirement.title,
                    vec![category],
                    treat_skipped_as_failure,
                )
                .with_description(requirement.description)
                .with_reported_counts(requirement.counts)
            })
            .collect();

        debug!(
            "Parsed EARL report '{}' ({}): {} requirement(s), {} unclassified assertion(s)",
            title,
            identifier,
            conformance_classes.len(),
            unclassified.len()
        );

        Ok(SuiteResult::new(identifier, title, start, duration, counts)
            .with_inputs(inputs)
            .with_conformance_classes(conformance_classes)
            .with_unclassified_test_cases(unclassified))
    }

    fn declared_suite_name(&self, document: &Document<'_>) -> Option<String> {
        let run = child_element(document.root_element(), (CITE_NS, "TestRun"))?;
        optional_text(run, (DCT_NS, "title"))
    }

    fn accepts(&self, document: &Document<'_>) -> bool {
        let root = document.root_element();
        root.tag_name().name() == "RDF" && root.tag_name().namespace() == Some(RDF_NS)
    }
}

/// Passed/failed/skipped counters, taken verbatim
fn parse_counts(node: Node<'_, '_>) -> Result<ResultCounts> {
    Ok(ResultCounts::new(
        required_count(node, (CITE_NS, "testsFailed"))?,
        required_count(node, (CITE_NS, "testsSkipped"))?,
        required_count(node, (CITE_NS, "testsPassed"))?,
    ))
}

fn parse_inputs(run: Node<'_, '_>) -> Result<Vec<SuiteInput>> {
    child_elements(run, (CITE_NS, "inputs"))
        .flat_map(|inputs| child_elements(inputs, (RDF_NS, "Bag")))
        .flat_map(|bag| child_elements(bag, (RDF_NS, "li")))
        .map(|li| -> Result<SuiteInput> {
            Ok(SuiteInput::new(
                required_text(li, (DCT_NS, "title"))?,
                optional_text(li, (DCT_NS, "description")).unwrap_or_default(),
            ))
        })
        .collect()
}

/// Requirements in declaration order; this order is the reported class order
fn parse_requirements(run: Node<'_, '_>) -> Result<Vec<Requirement>> {
    child_elements(run, (CITE_NS, "requirements"))
        .flat_map(|reqs| child_elements(reqs, (RDF_NS, "Seq")))
        .flat_map(|seq| child_elements(seq, (RDF_NS, "li")))
        .flat_map(|li| child_elements(li, (EARL_NS, "TestRequirement")))
        .map(parse_requirement)
        .collect()
}

fn parse_requirement(requirement_el: Node<'_, '_>) -> Result<Requirement> {
    let members = child_elements(requirement_el, (DCT_NS, "hasPart"))
        .map(part_identifier)
        .collect::<Result<HashSet<_>>>()?;

    Ok(Requirement {
        title: required_text(requirement_el, (DCT_NS, "title"))?,
        description: optional_text(requirement_el, (DCT_NS, "description")),
        counts: parse_counts(requirement_el)?,
        members,
    })
}

/// Identifier of a `dct:hasPart` member: either a graph reference or an inline test case
fn part_identifier(part_el: Node<'_, '_>) -> Result<String> {
    if let Some(resource) = part_el.attribute((RDF_NS, "resource")) {
        return Ok(resource.to_string());
    }
    let test_case = required_child(part_el, (EARL_NS, "TestCase"))?;
    test_case
        .attribute((RDF_NS, "about"))
        .map(str::to_string)
        .ok_or_else(|| NormalizeError::missing_attribute("earl:TestCase", "rdf:about"))
}

fn parse_assertion(assertion_el: Node<'_, '_>) -> Result<TestCaseResult> {
    let test_result = find_path(
        assertion_el,
        &[(EARL_NS, "result"), (EARL_NS, "TestResult")],
    )
    .ok_or_else(|| NormalizeError::missing_element("earl:TestResult", "earl:Assertion"))?;

    let outcome_el = required_child(test_result, (EARL_NS, "outcome"))?;
    let outcome = outcome_el
        .attribute((RDF_NS, "resource"))
        .ok_or_else(|| NormalizeError::missing_attribute("earl:outcome", "rdf:resource"))?;
    let status = parse_outcome(outcome);

    let test_el = required_child(assertion_el, (EARL_NS, "test"))?;
    let inline_case = child_element(test_el, (EARL_NS, "TestCase"));
    let identifier = match test_el.attribute((RDF_NS, "resource")) {
        Some(resource) => resource.to_string(),
        None => inline_case
            .and_then(|case| case.attribute((RDF_NS, "about")))
            .map(str::to_string)
            .ok_or_else(|| NormalizeError::missing_attribute("earl:test", "rdf:resource"))?,
    };

    let mut case = TestCaseResult::new(identifier, status);
    if let Some(inline_case) = inline_case {
        if let Some(title) = optional_text(inline_case, (DCT_NS, "title")) {
            case = case.with_name(title);
        }
        if let Some(description) = optional_text(inline_case, (DCT_NS, "description")) {
            case = case.with_description(description);
        }
    }

    Ok(case.with_detail(optional_text(test_result, (DCT_NS, "description"))))
}

/// Map an EARL outcome IRI (or bare token) to a status; unknown tokens fail closed
pub fn parse_outcome(outcome: &str) -> TestStatus {
    let token = outcome.rsplit('#').next().unwrap_or(outcome);
    match token {
        "passed" => TestStatus::Passed,
        "failed" => TestStatus::Failed,
        "untested" => TestStatus::Skipped,
        other => {
            warn!("Unrecognized EARL outcome '{}', treating as failure", other);
            TestStatus::Failed
        }
    }
}
