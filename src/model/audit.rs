// Counter audit - compares source-provided counters with the parsed children
// Parsers trust the source counters; this only reports where they disagree.

use serde::Serialize;

use super::{ResultCounts, SuiteResult};

/// A place where the counters a report declares differ from what was parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterMismatch {
    /// "suite" or the title of the conformance class
    pub scope: String,
    pub reported: ResultCounts,
    pub computed: ResultCounts,
}

impl std::fmt::Display for CounterMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: reported {}/{}/{} (failed/skipped/passed) but found {}/{}/{}",
            self.scope,
            self.reported.failed,
            self.reported.skipped,
            self.reported.passed,
            self.computed.failed,
            self.computed.skipped,
            self.computed.passed,
        )
    }
}

/// Cross-check declared counters against the parsed tree
pub fn audit(suite: &SuiteResult) -> Vec<CounterMismatch> {
    let mut mismatches = Vec::new();

    for class in suite.conformance_classes() {
        if let Some(reported) = class.reported_counts() {
            let computed = class.computed_counts();
            if reported != computed {
                mismatches.push(CounterMismatch {
                    scope: class.title().to_string(),
                    reported,
                    computed,
                });
            }
        }
    }

    let computed = suite.computed_counts();
    if suite.counts() != computed {
        mismatches.push(CounterMismatch {
            scope: "suite".to_string(),
            reported: suite.counts(),
            computed,
        });
    }

    mismatches
}
