// Serializers - render a SuiteResult as JSON, markdown or the raw report
// They only read the public model surface.

pub mod json;
pub mod markdown;

pub use json::{
    CategoryReport, ConformanceClassReport, JsonSerializer, OverviewReport, SuiteReport,
    TestCaseReport,
};
pub use markdown::MarkdownSerializer;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::SuiteResult;

/// Output representation requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    /// The report exactly as received
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "raw" => Ok(Self::Raw),
            other => Err(format!(
                "unknown output format '{}' (expected json, markdown or raw)",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
        })
    }
}

/// Closed set of text renderers a suite can be mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializerKind {
    /// Overview plus failed and skipped test cases
    Summary,
    /// Every test case of every conformance class
    Detailed,
}

impl SerializerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Detailed => "detailed",
        }
    }
}

impl std::str::FromStr for SerializerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" | "simple" => Ok(Self::Summary),
            "detailed" => Ok(Self::Detailed),
            other => Err(format!(
                "unknown serializer '{}' (expected summary or detailed)",
                other
            )),
        }
    }
}

impl std::fmt::Display for SerializerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializer trait
pub trait Serializer {
    fn serialize(&self, suite: &SuiteResult) -> Result<String>;
}

/// Render `suite` in the requested format.
///
/// `raw` is the original report text, returned untouched for `OutputFormat::Raw`.
pub fn render(
    suite: &SuiteResult,
    raw: &str,
    format: OutputFormat,
    kind: SerializerKind,
) -> Result<String> {
    match format {
        OutputFormat::Json => JsonSerializer.serialize(suite),
        OutputFormat::Markdown => MarkdownSerializer::new(kind).serialize(suite),
        OutputFormat::Raw => Ok(raw.to_string()),
    }
}
