// Dispatch - suite identifier -> (parser, serializer) lookup
//
// Resolution order for each field: per-suite entry from the config file,
// then the built-in entry for that suite, then the configured default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::parsers::ParserKind;
use crate::serializers::SerializerKind;

/// Suites known to publish EARL reports
const BUILTIN_EARL_SUITES: &[&str] = &["ogcapi-features-1.0", "ogcapi-processes-1.0"];

/// Per-suite override; unset fields fall through to the next layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<ParserKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializer: Option<SerializerKind>,
}

/// `[dispatch]` configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_parser")]
    pub default_parser: ParserKind,
    #[serde(default = "default_serializer")]
    pub default_serializer: SerializerKind,
    #[serde(default)]
    pub suites: BTreeMap<String, SuiteOverride>,
}

fn default_parser() -> ParserKind {
    ParserKind::Flat
}

fn default_serializer() -> SerializerKind {
    SerializerKind::Summary
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_parser: default_parser(),
            default_serializer: default_serializer(),
            suites: BTreeMap::new(),
        }
    }
}

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    pub suite_identifier: String,
    pub parser: ParserKind,
    pub serializer: SerializerKind,
    /// Whether a per-suite entry (configured or built-in) matched
    pub overridden: bool,
}

impl DispatchConfig {
    /// Built-in per-suite entry, if the suite has one
    pub fn builtin_override(suite_identifier: &str) -> Option<SuiteOverride> {
        BUILTIN_EARL_SUITES
            .contains(&suite_identifier)
            .then_some(SuiteOverride {
                parser: Some(ParserKind::Earl),
                serializer: None,
            })
    }

    pub fn resolve(&self, suite_identifier: &str) -> Dispatch {
        let configured = self.suites.get(suite_identifier).copied();
        let builtin = Self::builtin_override(suite_identifier);

        let parser = configured
            .and_then(|o| o.parser)
            .or_else(|| builtin.and_then(|o| o.parser))
            .unwrap_or(self.default_parser);
        let serializer = configured
            .and_then(|o| o.serializer)
            .or_else(|| builtin.and_then(|o| o.serializer))
            .unwrap_or(self.default_serializer);

        let dispatch = Dispatch {
            suite_identifier: suite_identifier.to_string(),
            parser,
            serializer,
            overridden: configured.is_some() || builtin.is_some(),
        };
        info!(
            "Suite '{}' -> parser {}, serializer {}{}",
            dispatch.suite_identifier,
            dispatch.parser,
            dispatch.serializer,
            if dispatch.overridden { "" } else { " (default)" }
        );
        dispatch
    }
}
