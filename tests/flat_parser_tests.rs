// Flat report parser tests

mod common;

use cite_report::parsers::{self, ParserKind};
use cite_report::{NormalizeError, TestStatus, normalize};
use common::*;

#[test]
fn test_scenario_a_three_outcomes() {
    // Arrange
    let xml = scenario_a();

    // Act
    let suite = normalize(&xml, ParserKind::Flat, false).unwrap();

    // Assert
    assert_eq!(suite.num_tests_total(), 3);
    assert_eq!(suite.num_failed_tests(), 1);
    assert_eq!(suite.num_skipped_tests(), 1);
    assert_eq!(suite.num_passed_tests(), 1);
    assert!(!suite.passed());

    assert_eq!(suite.conformance_classes().len(), 1);
    let class = &suite.conformance_classes()[0];
    assert_eq!(class.title(), "Basic");
    assert_eq!(class.categories().len(), 1);

    let category = &class.categories()[0];
    assert_eq!(category.short_name(), "GetCapabilitiesTests");
    let statuses: Vec<TestStatus> = category.test_cases().iter().map(|c| c.status()).collect();
    assert_eq!(
        statuses,
        vec![TestStatus::Passed, TestStatus::Failed, TestStatus::Skipped]
    );
}

#[test]
fn test_failure_message_and_timing() {
    let suite = normalize(&scenario_a(), ParserKind::Flat, false).unwrap();

    let failed: Vec<_> = suite.failed_test_cases().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name(), "describeFeatureType");
    assert_eq!(failed[0].detail(), Some("expected 200 but was 500"));

    assert_eq!(suite.test_run_duration().num_milliseconds(), 1234);
    assert_eq!(
        suite.test_run_start().to_rfc3339(),
        "2024-03-01T10:15:00+00:00"
    );
    assert!(suite.inputs().is_empty());
}

#[test]
fn test_config_methods_are_excluded() {
    let xml = flat_report(
        "wfs20-1.38",
        (1, 0, 0, 1),
        &[(
            "Basic",
            vec![(
                "org.example.Basic",
                vec![
                    config_method("setUp"),
                    method("getCapabilities", "PASS"),
                    config_method("tearDown"),
                ],
            )],
        )],
    );

    let suite = normalize(&xml, ParserKind::Flat, false).unwrap();

    let names: Vec<&str> = suite.test_cases().map(|c| c.name()).collect();
    assert_eq!(names, vec!["getCapabilities"]);
    assert!(suite.passed());
}

#[test]
fn test_config_method_does_not_reserve_its_name() {
    let xml = flat_report(
        "wfs20-1.38",
        (1, 0, 0, 1),
        &[(
            "Basic",
            vec![(
                "org.example.Basic",
                vec![config_method("setUp"), method("setUp", "PASS")],
            )],
        )],
    );

    let suite = normalize(&xml, ParserKind::Flat, false).unwrap();

    let names: Vec<&str> = suite.test_cases().map(|c| c.identifier()).collect();
    assert_eq!(names, vec!["setUp"]);
}

#[test]
fn test_duplicate_names_get_numbered_suffixes() {
    let xml = flat_report(
        "wfs20-1.38",
        (3, 0, 0, 3),
        &[
            (
                "Basic",
                vec![(
                    "org.example.Basic",
                    vec![method("A", "PASS"), method("A", "PASS")],
                )],
            ),
            (
                "Transactional",
                vec![("org.example.Transaction", vec![method("A", "PASS")])],
            ),
        ],
    );

    let suite = normalize(&xml, ParserKind::Flat, false).unwrap();

    let names: Vec<&str> = suite.test_cases().map(|c| c.identifier()).collect();
    assert_eq!(names, vec!["A", "A-001", "A-002"]);
}

#[test]
fn test_parameters_and_reporter_output() {
    let xml = flat_report(
        "wfs20-1.38",
        (1, 0, 0, 1),
        &[(
            "Basic",
            vec![(
                "org.example.Basic",
                vec![parameterized_method("getFeature", "PASS", &["ns:Roads", " "])],
            )],
        )],
    );

    let suite = normalize(&xml, ParserKind::Flat, false).unwrap();

    let case = suite.test_cases().next().unwrap();
    assert_eq!(case.parameters(), ["ns:Roads"]);
    assert_eq!(case.output(), Some("request sent"));
}

#[test]
fn test_skips_fail_the_suite_under_policy() {
    let lenient = normalize(&scenario_a_without_failure(), ParserKind::Flat, false).unwrap();
    let strict = normalize(&scenario_a_without_failure(), ParserKind::Flat, true).unwrap();

    assert!(lenient.passed());
    assert!(!strict.passed());
}

fn scenario_a_without_failure() -> String {
    flat_report(
        "wfs20-1.38",
        (2, 0, 1, 1),
        &[(
            "Basic",
            vec![(
                "org.example.Basic",
                vec![method("a", "PASS"), method("b", "SKIP")],
            )],
        )],
    )
}

#[test]
fn test_empty_suite() {
    let xml = flat_report("empty-1.0", (0, 0, 0, 0), &[]);

    let suite = normalize(&xml, ParserKind::Flat, false).unwrap();

    assert!(suite.conformance_classes().is_empty());
    assert_eq!(suite.num_tests_total(), 0);
    assert!(suite.passed());
}

#[test]
fn test_malformed_xml_is_normalize_error() {
    let xml = scenario_a();
    let truncated = &xml[..xml.len() / 2];

    let err = normalize(truncated, ParserKind::Flat, false).unwrap_err();

    assert!(matches!(err, NormalizeError::Xml(_)));
    assert_eq!(err.code(), "MALFORMED_XML");
}

#[test]
fn test_invalid_counter_is_rejected() {
    let xml = scenario_a().replace(r#"total="3""#, r#"total="three""#);

    let err = normalize(&xml, ParserKind::Flat, false).unwrap_err();

    assert!(matches!(err, NormalizeError::InvalidValue { .. }));
}

#[test]
fn test_earl_document_is_rejected() {
    let err = normalize(&scenario_b(), ParserKind::Flat, false).unwrap_err();
    assert!(matches!(err, NormalizeError::UnexpectedRoot { .. }));
}

#[test]
fn test_foreign_root_is_rejected() {
    let xml = r#"<junit-results total="1" passed="1"><suite name="x-1"><test name="T"><class name="a.B"><test-method name="m" status="PASS"/></class></test></suite></junit-results>"#;

    let err = normalize(xml, ParserKind::Flat, false).unwrap_err();

    match err {
        NormalizeError::UnexpectedRoot { expected, found } => {
            assert_eq!(expected, "testng-results");
            assert_eq!(found, "junit-results");
        }
        other => panic!("expected UnexpectedRoot, got {other:?}"),
    }
    let document = parsers::parse_document(xml).unwrap();
    assert_eq!(parsers::detect_dialect(&document), None);
}

#[test]
fn test_negative_duration_is_rejected() {
    let xml = scenario_a().replacen(r#"duration-ms="1234""#, r#"duration-ms="-5000""#, 1);

    let err = normalize(&xml, ParserKind::Flat, false).unwrap_err();

    assert!(matches!(
        err,
        NormalizeError::InvalidValue { ref field, .. } if field == "duration-ms"
    ));
}

#[test]
fn test_declared_suite_name() {
    let xml = scenario_a();
    let document = parsers::parse_document(&xml).unwrap();

    let name = parsers::declared_suite_name(&document).unwrap();

    assert_eq!(name, "wfs20-1.38");
    assert_eq!(parsers::suite_identifier(&name), "wfs20");
}
