// JSON serializer - stable, deserializable view of a SuiteResult

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Serializer;
use crate::model::{
    CategoryResult, ConformanceClassResult, ResultCounts, SuiteInput, SuiteResult,
    TestCaseResult, TestStatus,
};

/// Top-level JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_identifier: String,
    pub suite_title: String,
    pub test_run_start: DateTime<Utc>,
    pub test_run_end: DateTime<Utc>,
    pub test_run_duration_ms: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<SuiteInput>,
    pub overview: OverviewReport,
    pub passed: bool,
    pub conformance_classes: Vec<ConformanceClassReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unclassified_test_cases: Vec<TestCaseReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub total: usize,
    pub failed: usize,
    pub skipped: usize,
    pub passed: usize,
}

impl From<ResultCounts> for OverviewReport {
    fn from(counts: ResultCounts) -> Self {
        Self {
            total: counts.total,
            failed: counts.failed,
            skipped: counts.skipped,
            passed: counts.passed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceClassReport {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub passed: bool,
    pub counts: OverviewReport,
    pub categories: Vec<CategoryReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub name: String,
    pub short_name: String,
    pub passed: bool,
    pub test_cases: Vec<TestCaseReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseReport {
    pub identifier: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

impl From<&SuiteResult> for SuiteReport {
    fn from(suite: &SuiteResult) -> Self {
        Self {
            suite_identifier: suite.identifier().to_string(),
            suite_title: suite.title().to_string(),
            test_run_start: suite.test_run_start(),
            test_run_end: suite.test_run_end(),
            test_run_duration_ms: suite.test_run_duration().num_milliseconds(),
            inputs: suite.inputs().to_vec(),
            overview: suite.counts().into(),
            passed: suite.passed(),
            conformance_classes: suite
                .conformance_classes()
                .iter()
                .map(ConformanceClassReport::from)
                .collect(),
            unclassified_test_cases: suite
                .unclassified_test_cases()
                .iter()
                .map(TestCaseReport::from)
                .collect(),
        }
    }
}

impl From<&ConformanceClassResult> for ConformanceClassReport {
    fn from(class: &ConformanceClassResult) -> Self {
        Self {
            title: class.title().to_string(),
            description: class.description().map(str::to_string),
            passed: class.passed(),
            counts: class.counts().into(),
            categories: class.categories().iter().map(CategoryReport::from).collect(),
        }
    }
}

impl From<&CategoryResult> for CategoryReport {
    fn from(category: &CategoryResult) -> Self {
        Self {
            name: category.name().to_string(),
            short_name: category.short_name().to_string(),
            passed: category.passed(),
            test_cases: category.test_cases().iter().map(TestCaseReport::from).collect(),
        }
    }
}

impl From<&TestCaseResult> for TestCaseReport {
    fn from(case: &TestCaseResult) -> Self {
        Self {
            identifier: case.identifier().to_string(),
            name: case.name().to_string(),
            description: case.description().to_string(),
            status: case.status(),
            detail: case.detail().map(str::to_string),
            output: case.output().map(str::to_string),
            parameters: case.parameters().to_vec(),
        }
    }
}

/// Pretty-printed JSON output
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, suite: &SuiteResult) -> Result<String> {
        serde_json::to_string_pretty(&SuiteReport::from(suite))
            .context("Failed to serialize suite result to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn suite() -> SuiteResult {
        let cases = vec![
            TestCaseResult::new("landing", TestStatus::Passed),
            TestCaseResult::new("collections", TestStatus::Failed)
                .with_detail(Some("expected 200".to_string())),
        ];
        let class = ConformanceClassResult::new(
            "Core",
            vec![CategoryResult::new("org.example.Core", "Core", cases, false)],
            false,
        );
        SuiteResult::new(
            "demo-1.0",
            "demo-1.0-1.2",
            Utc::now(),
            TimeDelta::milliseconds(1500),
            ResultCounts::new(1, 0, 1),
        )
        .with_conformance_classes(vec![class])
    }

    #[test]
    fn test_report_mirrors_model() {
        let report = SuiteReport::from(&suite());
        assert_eq!(report.test_run_duration_ms, 1500);
        assert!(!report.passed);
        assert_eq!(report.overview.failed, 1);
        let case = &report.conformance_classes[0].categories[0].test_cases[1];
        assert_eq!(case.status, TestStatus::Failed);
        assert_eq!(case.detail.as_deref(), Some("expected 200"));
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let json = JsonSerializer.serialize(&suite()).unwrap();
        assert!(!json.contains("unclassified_test_cases"));
        assert!(!json.contains("\"parameters\""));
        assert!(json.contains("\"status\": \"FAILED\""));
    }
}
