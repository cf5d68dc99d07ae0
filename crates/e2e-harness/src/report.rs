//! JUnit XML reports

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub name: String,
    pub duration: Duration,
    pub failure: Option<String>,
    pub snapshot: Option<PathBuf>,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecOutcome {
    /// Spec path relative to the project root
    pub spec: String,
    pub started: DateTime<Utc>,
    pub tests: Vec<TestOutcome>,
    /// One line per executed step
    pub transcript: Vec<String>,
}

impl SpecOutcome {
    pub fn failures(&self) -> usize {
        self.tests.iter().filter(|t| !t.passed()).count()
    }

    pub fn duration(&self) -> Duration {
        self.tests.iter().map(|t| t.duration).sum()
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Render one spec as a JUnit document
pub fn to_junit(outcome: &SpecOutcome, browser: &str) -> String {
    let tests = outcome.tests.len();
    let failures = outcome.failures();
    let time = outcome.duration().as_secs_f64();
    let spec = escape(&outcome.spec);

    let mut xml = String::new();
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        xml,
        r#"<testsuites name="Item Board e2e" time="{:.3}" tests="{}" failures="{}">"#,
        time, tests, failures
    );
    let _ = writeln!(
        xml,
        r#"  <testsuite name="{}" file="{}" timestamp="{}" tests="{}" failures="{}" time="{:.3}">"#,
        spec,
        spec,
        outcome.started.format("%Y-%m-%dT%H:%M:%S"),
        tests,
        failures,
        time
    );
    let _ = writeln!(xml, "    <properties>");
    let _ = writeln!(
        xml,
        r#"      <property name="browser" value="{}"/>"#,
        escape(browser)
    );
    let _ = writeln!(xml, "    </properties>");

    for test in &outcome.tests {
        let name = escape(&test.name);
        let time = test.duration.as_secs_f64();
        match &test.failure {
            None => {
                let _ = writeln!(
                    xml,
                    r#"    <testcase name="{}" classname="{}" time="{:.3}"/>"#,
                    name, spec, time
                );
            }
            Some(failure) => {
                let _ = writeln!(
                    xml,
                    r#"    <testcase name="{}" classname="{}" time="{:.3}">"#,
                    name, spec, time
                );
                let _ = writeln!(
                    xml,
                    r#"      <failure message="{}" type="AssertionError">{}</failure>"#,
                    escape(failure),
                    escape(failure)
                );
                if let Some(snapshot) = &test.snapshot {
                    let _ = writeln!(
                        xml,
                        "      <system-out>[[ATTACHMENT|{}]]</system-out>",
                        escape(&snapshot.display().to_string())
                    );
                }
                let _ = writeln!(xml, "    </testcase>");
            }
        }
    }

    let _ = writeln!(xml, "  </testsuite>");
    let _ = writeln!(xml, "</testsuites>");
    xml
}

/// Fill `[hash]` in the template with the report's content hash
pub fn report_path(root: &Path, template: &str, xml: &str) -> PathBuf {
    let hash = blake3::hash(xml.as_bytes()).to_hex();
    root.join(template.replace("[hash]", &hash.as_str()[..32]))
}

/// Write the report and return where it went
pub fn write_junit(root: &Path, template: &str, outcome: &SpecOutcome, browser: &str) -> Result<PathBuf> {
    let xml = to_junit(outcome, browser);
    let path = report_path(root, template, &xml);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
    }
    std::fs::write(&path, xml).map_err(|e| HarnessError::io(&path, e))?;
    Ok(path)
}
