use std::fmt::Write;

use super::RunReport;

const RULE: &str = "============================================================";

fn verdict(passed: bool) -> &'static str {
    if passed { "PASSED" } else { "FAILED" }
}

pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Backend API tests against {}", report.target);
    let _ = writeln!(
        out,
        "Test started at: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "{RULE}");

    for result in &report.results {
        let _ = write!(out, "{:<26} {}", result.name, verdict(result.passed));
        if let Some(reason) = &result.reason {
            let _ = write!(out, "  ({reason})");
        }
        out.push('\n');

        for scenario in &result.scenarios {
            let status = scenario
                .status
                .map(|code| code.to_string())
                .unwrap_or_else(|| "-".into());
            let _ = writeln!(
                out,
                "    {:<30} HTTP {:<4} {}",
                scenario.name,
                status,
                verdict(scenario.passed)
            );
        }
    }

    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "TEST SUMMARY");
    let _ = writeln!(out, "{RULE}");
    for result in &report.results {
        let _ = writeln!(out, "   {}: {}", result.title, verdict(result.passed));
    }

    let _ = writeln!(
        out,
        "\nOverall Result: {}/{} tests passed ({} ms)",
        report.passed_count(),
        report.total(),
        report.duration_ms
    );
    if report.all_passed() {
        out.push_str("All backend tests passed successfully!\n");
    } else {
        out.push_str("Some backend tests failed. Please check the details above.\n");
    }
    out
}

pub fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    use crate::testing::{Case, CaseResult, ScenarioResult};

    fn sample_report() -> RunReport {
        let scenarios = vec![
            ScenarioResult {
                name: "Empty Name Test",
                status: Some(422),
                passed: true,
                reason: None,
            },
            ScenarioResult {
                name: "Short Message Test",
                status: Some(200),
                passed: false,
                reason: Some("HTTP 200 (expected 422 or 400)".into()),
            },
        ];
        RunReport {
            target: "http://localhost:8001/api".into(),
            started_at: Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
            duration_ms: 42,
            results: vec![
                CaseResult::pass(Case::HealthCheck),
                CaseResult::from_scenarios(Case::ContactFormValidation, scenarios),
            ],
            submitted_id: Some("abc".into()),
        }
    }

    #[test]
    fn text_report_lists_cases_and_summary() {
        let text = render_text(&sample_report());

        assert!(text.contains("Backend API tests against http://localhost:8001/api"));
        assert!(text.contains("Test started at: 2026-10-16 09:30:00"));
        assert!(text.contains("   Health Check: PASSED"));
        assert!(text.contains("   Contact Form Validation: FAILED"));
        assert!(text.contains("Short Message Test"));
        assert!(text.contains("HTTP 200"));
        assert!(text.contains("Overall Result: 1/2 tests passed"));
        assert!(text.ends_with("Please check the details above.\n"));
    }

    #[test]
    fn text_report_celebrates_clean_run() {
        let report = RunReport {
            results: vec![CaseResult::pass(Case::HealthCheck)],
            ..Default::default()
        };
        let text = render_text(&report);
        assert!(text.contains("Overall Result: 1/1 tests passed"));
        assert!(text.contains("All backend tests passed successfully!"));
    }

    #[test]
    fn json_report_keeps_names_in_order() {
        let value: serde_json::Value =
            serde_json::from_str(&render_json(&sample_report()).unwrap()).unwrap();

        assert_eq!(value["results"][0]["name"], "health_check");
        assert_eq!(value["results"][0]["passed"], true);
        assert!(value["results"][0].get("reason").is_none());
        assert_eq!(value["results"][1]["scenarios"][1]["status"], 200);
        assert_eq!(value["submitted_id"], "abc");
        assert!(value["started_at"].as_str().unwrap().starts_with("2026-10-16T09:30:00"));
    }
}
