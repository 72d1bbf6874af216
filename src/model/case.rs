// Test case result - leaf of the result tree

use super::TestStatus;

/// Outcome of a single test case.
///
/// The identifier is unique within the suite it was parsed from. Detail text is
/// only kept for outcomes other than `Passed`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseResult {
    identifier: String,
    name: String,
    description: String,
    status: TestStatus,
    detail: Option<String>,
    output: Option<String>,
    parameters: Vec<String>,
}

impl TestCaseResult {
    /// Create a result whose display name defaults to its identifier
    pub fn new(identifier: impl Into<String>, status: TestStatus) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            identifier,
            description: String::new(),
            status,
            detail: None,
            output: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a failure/skip explanation; ignored for passed test cases
    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        if self.status != TestStatus::Passed {
            self.detail = detail.filter(|d| !d.is_empty());
        }
        self
    }

    pub fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output.filter(|o| !o.is_empty());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn is_passed(&self) -> bool {
        self.status == TestStatus::Passed
    }

    pub fn is_failed(&self) -> bool {
        self.status == TestStatus::Failed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == TestStatus::Skipped
    }
}
