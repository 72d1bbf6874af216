pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod model;
pub mod parsers;
pub mod serializers;
pub mod time;
pub mod utils;

pub use error::NormalizeError;
pub use model::{
    CategoryResult, ConformanceClassResult, ResultCounts, SuiteInput, SuiteResult,
    TestCaseResult, TestStatus,
};
pub use parsers::{ParserKind, ReportParser, normalize};
pub use serializers::{OutputFormat, SerializerKind};
