// Diagnostics produced by the check command

use serde::{Deserialize, Serialize};

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const UNCLASSIFIED_TEST_CASE: &str = "UNCLASSIFIED_TEST_CASE";
pub const COUNTER_MISMATCH: &str = "COUNTER_MISMATCH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub severity: DiagnosticSeverity,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub diagnostics: Vec<Diagnostic>,
    pub summary: CheckSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl Diagnostic {
    pub fn error(file: &str, code: &str, message: &str) -> Self {
        Self::new(file, DiagnosticSeverity::Error, code, message)
    }

    pub fn warning(file: &str, code: &str, message: &str) -> Self {
        Self::new(file, DiagnosticSeverity::Warning, code, message)
    }

    fn new(file: &str, severity: DiagnosticSeverity, code: &str, message: &str) -> Self {
        Self {
            file: file.to_string(),
            severity,
            code: code.to_string(),
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl CheckReport {
    pub fn new(diagnostics: Vec<Diagnostic>, total_files: usize, files_with_errors: usize) -> Self {
        let total_errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let total_warnings = diagnostics.len() - total_errors;
        Self {
            diagnostics,
            summary: CheckSummary {
                total_files,
                files_with_errors,
                total_errors,
                total_warnings,
            },
        }
    }
}
