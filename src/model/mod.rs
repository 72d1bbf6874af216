// Result model - canonical, dialect-independent view of one test suite run
// suite -> conformance class -> category -> test case; rollups are computed on read

pub mod audit;
pub mod case;
pub mod suite;

pub use audit::{CounterMismatch, audit};
pub use case::TestCaseResult;
pub use suite::{CategoryResult, ConformanceClassResult, SuiteResult};

use serde::{Deserialize, Serialize};

/// Outcome of a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Test case counters, either taken from the source report or derived from children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultCounts {
    pub total: usize,
    pub failed: usize,
    pub skipped: usize,
    pub passed: usize,
}

impl ResultCounts {
    /// Counters where the total is the sum of the three outcomes
    pub fn new(failed: usize, skipped: usize, passed: usize) -> Self {
        Self {
            total: failed + skipped + passed,
            failed,
            skipped,
            passed,
        }
    }

    /// Count outcomes of the given test cases
    pub fn tally<'a>(cases: impl IntoIterator<Item = &'a TestCaseResult>) -> Self {
        cases
            .into_iter()
            .fold(Self::default(), |mut counts, case| {
                counts.record(case.status());
                counts
            })
    }

    pub fn record(&mut self, status: TestStatus) {
        self.total += 1;
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
    }

    /// Whether a bucket with these counters passes under the given skip policy
    pub fn is_passing(&self, treat_skipped_as_failure: bool) -> bool {
        self.failed == 0 && !(treat_skipped_as_failure && self.skipped > 0)
    }
}

impl std::ops::Add for ResultCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            failed: self.failed + other.failed,
            skipped: self.skipped + other.skipped,
            passed: self.passed + other.passed,
        }
    }
}

impl std::iter::Sum for ResultCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, c| acc + c)
    }
}

/// Name/value pair supplied to the test run (e.g. `iut=https://example.org/api`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteInput {
    pub name: String,
    pub value: String,
}

impl SuiteInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
