// Inspect command - show how a report would be dispatched

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::args::InspectArgs;
use crate::config::Config;
use crate::dispatch::Dispatch;
use crate::parsers::{self, ParserKind};
use crate::utils::FileUtils;

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub file: String,
    pub root_element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_namespace: Option<String>,
    pub detected_dialect: Option<ParserKind>,
    pub declared_suite_name: Option<String>,
    pub dispatch: Option<Dispatch>,
    /// Whether the dispatched parser recognizes the document root
    pub parser_matches_dialect: bool,
}

pub fn handle_inspect(args: &InspectArgs, config: &Config) -> Result<()> {
    let raw = FileUtils::read_file(&args.report)?;
    let document = parsers::parse_document(&raw)
        .with_context(|| format!("Failed to load report {}", args.report.display()))?;

    let root = document.root_element();
    let detected_dialect = parsers::detect_dialect(&document);
    let declared_suite_name = parsers::declared_suite_name(&document);
    let dispatch = declared_suite_name
        .as_deref()
        .map(|name| config.dispatch.resolve(parsers::suite_identifier(name)));
    let parser_matches_dialect = dispatch
        .as_ref()
        .is_some_and(|d| d.parser.parser().accepts(&document));

    let report = InspectReport {
        file: args.report.to_string_lossy().to_string(),
        root_element: root.tag_name().name().to_string(),
        root_namespace: root.tag_name().namespace().map(str::to_string),
        detected_dialect,
        declared_suite_name,
        dispatch,
        parser_matches_dialect,
    };

    if args.is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:            {}", report.file);
    match &report.root_namespace {
        Some(ns) => println!("Root element:    {} ({})", report.root_element, ns),
        None => println!("Root element:    {}", report.root_element),
    }
    println!(
        "Dialect:         {}",
        report
            .detected_dialect
            .map_or("unknown", |kind| kind.as_str())
    );
    println!(
        "Suite name:      {}",
        report.declared_suite_name.as_deref().unwrap_or("-")
    );
    match &report.dispatch {
        Some(dispatch) => {
            println!("Suite id:        {}", dispatch.suite_identifier);
            println!(
                "Parser:          {}{}",
                dispatch.parser,
                if dispatch.overridden { "" } else { " (default)" }
            );
            println!("Serializer:      {}", dispatch.serializer);
            if !report.parser_matches_dialect {
                println!(
                    "Warning:         the {} parser does not accept this document",
                    dispatch.parser
                );
            }
        }
        None => println!("Suite id:        - (use `parse --suite` to choose one)"),
    }

    Ok(())
}
