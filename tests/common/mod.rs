// Shared report fixtures for integration tests
#![allow(dead_code)]

pub const EARL_PASSED: &str = "http://www.w3.org/ns/earl#passed";
pub const EARL_FAILED: &str = "http://www.w3.org/ns/earl#failed";
pub const EARL_UNTESTED: &str = "http://www.w3.org/ns/earl#untested";

// ---------------------------------------------------------------------------
// Flat dialect
// ---------------------------------------------------------------------------

pub fn method(name: &str, status: &str) -> String {
    format!(
        r#"<test-method status="{status}" signature="{name}()" name="{name}" description="checks {name}" duration-ms="5" started-at="2024-03-01T10:15:00Z" finished-at="2024-03-01T10:15:00Z"/>"#
    )
}

pub fn failing_method(name: &str, message: &str) -> String {
    format!(
        r#"<test-method status="FAIL" signature="{name}()" name="{name}">
            <exception class="java.lang.AssertionError">
              <message><![CDATA[{message}]]></message>
            </exception>
          </test-method>"#
    )
}

pub fn config_method(name: &str) -> String {
    format!(r#"<test-method status="PASS" is-config="true" signature="{name}()" name="{name}"/>"#)
}

pub fn parameterized_method(name: &str, status: &str, params: &[&str]) -> String {
    let params: String = params
        .iter()
        .enumerate()
        .map(|(i, p)| format!(r#"<param index="{i}"><value><![CDATA[{p}]]></value></param>"#))
        .collect();
    format!(
        r#"<test-method status="{status}" name="{name}"><params>{params}</params><reporter-output><line><![CDATA[request sent]]></line></reporter-output></test-method>"#
    )
}

/// Flat report; `tests` is a list of (test name, [(class name, methods)])
pub fn flat_report(
    suite_name: &str,
    counts: (usize, usize, usize, usize),
    tests: &[(&str, Vec<(&str, Vec<String>)>)],
) -> String {
    let (total, failed, skipped, passed) = counts;
    let body: String = tests
        .iter()
        .map(|(test_name, classes)| {
            let classes: String = classes
                .iter()
                .map(|(class_name, methods)| {
                    format!(
                        r#"<class name="{class_name}">{}</class>"#,
                        methods.concat()
                    )
                })
                .collect();
            format!(r#"<test name="{test_name}" duration-ms="40">{classes}</test>"#)
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<testng-results ignored="0" total="{total}" passed="{passed}" failed="{failed}" skipped="{skipped}">
  <reporter-output/>
  <suite name="{suite_name}" duration-ms="1234" started-at="2024-03-01T10:15:00Z" finished-at="2024-03-01T10:15:01Z">
    <groups/>
    {body}
  </suite>
</testng-results>
"#
    )
}

/// One test, one class, three methods: pass, fail, skip
pub fn scenario_a() -> String {
    flat_report(
        "wfs20-1.38",
        (3, 1, 1, 1),
        &[(
            "Basic",
            vec![(
                "org.opengis.cite.iso19142.basic.GetCapabilitiesTests",
                vec![
                    method("getCapabilities", "PASS"),
                    failing_method("describeFeatureType", "expected 200 but was 500"),
                    method("getFeature", "SKIP"),
                ],
            )],
        )],
    )
}

// ---------------------------------------------------------------------------
// EARL dialect
// ---------------------------------------------------------------------------

pub struct EarlRequirement {
    pub title: String,
    pub cases: Vec<(String, &'static str)>,
}

impl EarlRequirement {
    /// Requirement with generated case identifiers and the given outcome counts
    pub fn generated(title: &str, slug: &str, failed: usize, skipped: usize, passed: usize) -> Self {
        let outcomes = std::iter::repeat_n(EARL_FAILED, failed)
            .chain(std::iter::repeat_n(EARL_UNTESTED, skipped))
            .chain(std::iter::repeat_n(EARL_PASSED, passed));
        Self {
            title: title.to_string(),
            cases: outcomes
                .enumerate()
                .map(|(i, outcome)| (format!("urn:cite:{slug}:case-{i:03}"), outcome))
                .collect(),
        }
    }

    fn count(&self, outcome: &str) -> usize {
        self.cases.iter().filter(|(_, o)| *o == outcome).count()
    }
}

fn counters(failed: usize, skipped: usize, passed: usize) -> String {
    format!(
        "<cite:testsPassed>{passed}</cite:testsPassed><cite:testsFailed>{failed}</cite:testsFailed><cite:testsSkipped>{skipped}</cite:testsSkipped>"
    )
}

fn assertion(index: usize, identifier: &str, outcome: &str) -> String {
    let description = if outcome == EARL_PASSED {
        String::new()
    } else {
        format!("<dct:description>outcome of {identifier}</dct:description>")
    };
    format!(
        r#"<earl:Assertion rdf:about="assert-{index}">
    <earl:assertedBy rdf:resource="assessor"/>
    <earl:result><earl:TestResult><earl:outcome rdf:resource="{outcome}"/>{description}</earl:TestResult></earl:result>
    <earl:test rdf:resource="{identifier}"/>
  </earl:Assertion>"#
    )
}

/// EARL report whose counters match its requirements; `extra` assertions are
/// emitted without being listed in any requirement
pub fn earl_report(
    identifier: &str,
    title: &str,
    requirements: &[EarlRequirement],
    extra: &[(&str, &str)],
) -> String {
    let failed: usize = requirements.iter().map(|r| r.count(EARL_FAILED)).sum();
    let skipped: usize = requirements.iter().map(|r| r.count(EARL_UNTESTED)).sum();
    let passed: usize = requirements.iter().map(|r| r.count(EARL_PASSED)).sum();

    let requirement_items: String = requirements
        .iter()
        .map(|r| {
            let parts: String = r
                .cases
                .iter()
                .map(|(id, _)| format!(r#"<dct:hasPart rdf:resource="{id}"/>"#))
                .collect();
            format!(
                r#"<rdf:li><earl:TestRequirement rdf:about="urn:req:{slug}"><dct:title>{title}</dct:title><dct:description>Requirements of {title}</dct:description>{counters}{parts}</earl:TestRequirement></rdf:li>"#,
                slug = r.title.to_lowercase().replace(' ', "-"),
                title = r.title,
                counters = counters(
                    r.count(EARL_FAILED),
                    r.count(EARL_UNTESTED),
                    r.count(EARL_PASSED)
                ),
            )
        })
        .collect();

    let assertions: String = requirements
        .iter()
        .flat_map(|r| r.cases.iter().map(|(id, o)| (id.as_str(), *o)))
        .chain(extra.iter().copied())
        .enumerate()
        .map(|(i, (id, outcome))| assertion(i, id, outcome))
        .collect::<Vec<_>>()
        .join("\n  ");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:earl="http://www.w3.org/ns/earl#"
         xmlns:dct="http://purl.org/dc/terms/"
         xmlns:cite="http://cite.opengeospatial.org/">
  <cite:TestRun>
    <dct:title>{title}</dct:title>
    <dct:identifier>{identifier}</dct:identifier>
    <dct:created>2024-03-01T10:15:00.000Z</dct:created>
    <dct:extent>PT1M23.456S</dct:extent>
    {counters}
    <cite:inputs>
      <rdf:Bag>
        <rdf:li><dct:title>iut</dct:title><dct:description>https://demo.example.org/api</dct:description></rdf:li>
      </rdf:Bag>
    </cite:inputs>
    <cite:requirements>
      <rdf:Seq>{requirement_items}</rdf:Seq>
    </cite:requirements>
  </cite:TestRun>
  {assertions}
</rdf:RDF>
"#,
        counters = counters(failed, skipped, passed),
    )
}

/// Synthetic ogcapi-features run: 282 assertions over two requirements
pub fn scenario_b() -> String {
    earl_report(
        "s0007",
        "ogcapi-features-1.0-1.6",
        &[
            EarlRequirement::generated(
                "Coordinate Reference Systems by Reference",
                "crs",
                0,
                4,
                41,
            ),
            EarlRequirement::generated("Core", "core", 12, 2, 223),
        ],
        &[],
    )
}
