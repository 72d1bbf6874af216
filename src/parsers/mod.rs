// Report parsers - turn a raw CITE report into the canonical result model
// Two dialects are supported: the flat TestNG-style report and W3C EARL/RDF.

pub mod earl;
pub mod flat;
pub(crate) mod xml;

pub use earl::EarlReportParser;
pub use flat::FlatReportParser;

use roxmltree::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NormalizeError;
use crate::model::SuiteResult;

pub type Result<T> = std::result::Result<T, NormalizeError>;

/// A report dialect parser.
///
/// Implementations are stateless; every call builds a fresh tree from one
/// document, so a parser may be shared across threads.
pub trait ReportParser: Send + Sync {
    /// Parse an already loaded document
    fn parse(&self, document: &Document<'_>, treat_skipped_as_failure: bool)
    -> Result<SuiteResult>;

    /// Declared suite name (e.g. `ogcapi-features-1.0-1.6`), if the document has one
    fn declared_suite_name(&self, document: &Document<'_>) -> Option<String>;

    /// Whether the document root looks like this parser's dialect
    fn accepts(&self, document: &Document<'_>) -> bool;
}

/// Closed set of available parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// TestNG-style suite/test/class/test-method report
    Flat,
    /// W3C EARL assertions in RDF/XML
    Earl,
}

impl ParserKind {
    pub const ALL: [ParserKind; 2] = [ParserKind::Flat, ParserKind::Earl];

    pub fn parser(&self) -> &'static dyn ReportParser {
        match self {
            Self::Flat => &FlatReportParser,
            Self::Earl => &EarlReportParser,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Earl => "earl",
        }
    }
}

impl std::str::FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" | "simple" | "testng" => Ok(Self::Flat),
            "earl" => Ok(Self::Earl),
            other => Err(format!("unknown parser '{}' (expected flat or earl)", other)),
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load raw report text into an XML document
pub fn parse_document(raw: &str) -> Result<Document<'_>> {
    Document::parse(raw).map_err(|e| match e {
        roxmltree::Error::UnknownNamespace(prefix, _) => NormalizeError::UndeclaredNamespace(prefix),
        other => NormalizeError::Xml(other),
    })
}

/// Parse raw report text with the given parser
pub fn normalize(
    raw: &str,
    kind: ParserKind,
    treat_skipped_as_failure: bool,
) -> Result<SuiteResult> {
    let document = parse_document(raw)?;
    kind.parser().parse(&document, treat_skipped_as_failure)
}

/// Dialect whose root element the document carries, if any
pub fn detect_dialect(document: &Document<'_>) -> Option<ParserKind> {
    ParserKind::ALL
        .into_iter()
        .find(|kind| kind.parser().accepts(document))
}

/// Suite name declared inside the report, regardless of dialect
pub fn declared_suite_name(document: &Document<'_>) -> Option<String> {
    let name = detect_dialect(document)?
        .parser()
        .declared_suite_name(document)?;
    debug!("Declared suite name: {}", name);
    Some(name)
}

/// Strip the trailing version segment from a declared suite name.
///
/// `ogcapi-features-1.0-1.6` becomes `ogcapi-features-1.0`; a name without
/// any `-` is returned unchanged.
pub fn suite_identifier(suite_name: &str) -> &str {
    suite_name
        .rsplit_once('-')
        .map_or(suite_name, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_identifier_strips_version() {
        assert_eq!(suite_identifier("ogcapi-features-1.0-1.6"), "ogcapi-features-1.0");
        assert_eq!(suite_identifier("wfs20-1.38"), "wfs20");
        assert_eq!(suite_identifier("standalone"), "standalone");
    }

    #[test]
    fn test_parser_kind_from_str() {
        assert_eq!("EARL".parse::<ParserKind>().unwrap(), ParserKind::Earl);
        assert_eq!("simple".parse::<ParserKind>().unwrap(), ParserKind::Flat);
        assert!("junit".parse::<ParserKind>().is_err());
    }

    #[test]
    fn test_detect_dialect() {
        let flat = parse_document(r#"<testng-results total="0"><suite name="x-1"/></testng-results>"#)
            .unwrap();
        assert_eq!(detect_dialect(&flat), Some(ParserKind::Flat));

        let earl = parse_document(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#,
        )
        .unwrap();
        assert_eq!(detect_dialect(&earl), Some(ParserKind::Earl));

        let other = parse_document(r#"<x:junit xmlns:x="urn:other"/>"#).unwrap();
        assert_eq!(detect_dialect(&other), None);
    }

    #[test]
    fn test_truncated_document_is_xml_error() {
        let err = normalize("<testng-results><suite name=", ParserKind::Flat, false).unwrap_err();
        assert!(matches!(err, NormalizeError::Xml(_)));
    }

    #[test]
    fn test_unknown_prefix_is_undeclared_namespace() {
        let err = parse_document(r#"<rdf:RDF><earl:Assertion/></rdf:RDF>"#).unwrap_err();
        assert!(matches!(err, NormalizeError::UndeclaredNamespace(ref p) if p == "rdf"));
    }
}
