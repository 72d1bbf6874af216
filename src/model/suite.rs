// Suite, conformance class and category results

use chrono::{DateTime, TimeDelta, Utc};

use super::{ResultCounts, SuiteInput, TestCaseResult, TestStatus};

/// Group of test cases inside a conformance class.
///
/// For the flat dialect this is one `class` element; EARL reports have no
/// such level, so each requirement gets a single category named after it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    name: String,
    short_name: String,
    test_cases: Vec<TestCaseResult>,
    treat_skipped_as_failure: bool,
}

impl CategoryResult {
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        test_cases: Vec<TestCaseResult>,
        treat_skipped_as_failure: bool,
    ) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            test_cases,
            treat_skipped_as_failure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn test_cases(&self) -> &[TestCaseResult] {
        &self.test_cases
    }

    /// Zero failed test cases, and zero skipped ones when skips count as failures
    pub fn passed(&self) -> bool {
        self.counts().is_passing(self.treat_skipped_as_failure)
    }

    pub fn counts(&self) -> ResultCounts {
        ResultCounts::tally(&self.test_cases)
    }

    pub fn failed_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        with_status(&self.test_cases, TestStatus::Failed)
    }

    pub fn skipped_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        with_status(&self.test_cases, TestStatus::Skipped)
    }

    pub fn passed_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        with_status(&self.test_cases, TestStatus::Passed)
    }
}

/// Named requirement bucket with its own pass/fail rollup
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceClassResult {
    title: String,
    description: Option<String>,
    reported_counts: Option<ResultCounts>,
    categories: Vec<CategoryResult>,
    treat_skipped_as_failure: bool,
}

impl ConformanceClassResult {
    /// Class whose counters are derived from its test cases
    pub fn new(
        title: impl Into<String>,
        categories: Vec<CategoryResult>,
        treat_skipped_as_failure: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            reported_counts: None,
            categories,
            treat_skipped_as_failure,
        }
    }

    /// Use counters provided by the source report instead of recomputing them
    pub fn with_reported_counts(mut self, counts: ResultCounts) -> Self {
        self.reported_counts = Some(counts);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn categories(&self) -> &[CategoryResult] {
        &self.categories
    }

    /// Source-provided counters when available, otherwise derived from children
    pub fn counts(&self) -> ResultCounts {
        self.reported_counts.unwrap_or_else(|| self.computed_counts())
    }

    pub fn reported_counts(&self) -> Option<ResultCounts> {
        self.reported_counts
    }

    pub fn computed_counts(&self) -> ResultCounts {
        self.categories.iter().map(CategoryResult::counts).sum()
    }

    pub fn num_tests_total(&self) -> usize {
        self.counts().total
    }

    pub fn num_failed_tests(&self) -> usize {
        self.counts().failed
    }

    pub fn num_skipped_tests(&self) -> usize {
        self.counts().skipped
    }

    pub fn num_passed_tests(&self) -> usize {
        self.counts().passed
    }

    pub fn treat_skipped_as_failure(&self) -> bool {
        self.treat_skipped_as_failure
    }

    pub fn passed(&self) -> bool {
        self.counts().is_passing(self.treat_skipped_as_failure)
    }

    pub fn failed_categories(&self) -> impl Iterator<Item = &CategoryResult> {
        self.categories.iter().filter(|c| !c.passed())
    }

    pub fn successful_categories(&self) -> impl Iterator<Item = &CategoryResult> {
        self.categories.iter().filter(|c| c.passed())
    }

    pub fn test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.categories.iter().flat_map(|c| c.test_cases.iter())
    }

    pub fn failed_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.test_cases().filter(|c| c.is_failed())
    }

    pub fn skipped_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.test_cases().filter(|c| c.is_skipped())
    }

    pub fn passed_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.test_cases().filter(|c| c.is_passed())
    }
}

/// One parsed test suite run. Owns the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteResult {
    identifier: String,
    title: String,
    test_run_start: DateTime<Utc>,
    test_run_duration: TimeDelta,
    inputs: Vec<SuiteInput>,
    counts: ResultCounts,
    conformance_classes: Vec<ConformanceClassResult>,
    unclassified_test_cases: Vec<TestCaseResult>,
}

impl SuiteResult {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        test_run_start: DateTime<Utc>,
        test_run_duration: TimeDelta,
        counts: ResultCounts,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            test_run_start,
            test_run_duration,
            inputs: Vec::new(),
            counts,
            conformance_classes: Vec::new(),
            unclassified_test_cases: Vec::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<SuiteInput>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_conformance_classes(mut self, classes: Vec<ConformanceClassResult>) -> Self {
        self.conformance_classes = classes;
        self
    }

    /// Test cases that could not be linked to any conformance class
    pub fn with_unclassified_test_cases(mut self, cases: Vec<TestCaseResult>) -> Self {
        self.unclassified_test_cases = cases;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn test_run_start(&self) -> DateTime<Utc> {
        self.test_run_start
    }

    pub fn test_run_duration(&self) -> TimeDelta {
        self.test_run_duration
    }

    /// Start plus duration; saturates to the start on overflow
    pub fn test_run_end(&self) -> DateTime<Utc> {
        self.test_run_start
            .checked_add_signed(self.test_run_duration)
            .unwrap_or(self.test_run_start)
    }

    pub fn inputs(&self) -> &[SuiteInput] {
        &self.inputs
    }

    pub fn conformance_classes(&self) -> &[ConformanceClassResult] {
        &self.conformance_classes
    }

    pub fn unclassified_test_cases(&self) -> &[TestCaseResult] {
        &self.unclassified_test_cases
    }

    /// Counters as provided by the source report
    pub fn counts(&self) -> ResultCounts {
        self.counts
    }

    /// Counters summed over the conformance classes
    pub fn computed_counts(&self) -> ResultCounts {
        self.conformance_classes
            .iter()
            .map(ConformanceClassResult::counts)
            .sum()
    }

    pub fn num_tests_total(&self) -> usize {
        self.counts.total
    }

    pub fn num_failed_tests(&self) -> usize {
        self.counts.failed
    }

    pub fn num_skipped_tests(&self) -> usize {
        self.counts.skipped
    }

    pub fn num_passed_tests(&self) -> usize {
        self.counts.passed
    }

    /// True iff every conformance class passed
    pub fn passed(&self) -> bool {
        self.conformance_classes.iter().all(|c| c.passed())
    }

    pub fn failed_conformance_classes(&self) -> impl Iterator<Item = &ConformanceClassResult> {
        self.conformance_classes.iter().filter(|c| !c.passed())
    }

    pub fn successful_conformance_classes(
        &self,
    ) -> impl Iterator<Item = &ConformanceClassResult> {
        self.conformance_classes.iter().filter(|c| c.passed())
    }

    /// Every classified test case, in report order
    pub fn test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.conformance_classes.iter().flat_map(|c| c.test_cases())
    }

    pub fn failed_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.test_cases().filter(|c| c.is_failed())
    }

    pub fn skipped_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.test_cases().filter(|c| c.is_skipped())
    }

    pub fn passed_test_cases(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.test_cases().filter(|c| c.is_passed())
    }
}

fn with_status(
    cases: &[TestCaseResult],
    status: TestStatus,
) -> impl Iterator<Item = &TestCaseResult> {
    cases.iter().filter(move |c| c.status() == status)
}
