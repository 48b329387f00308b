//! # Contract Checks
//!
//! Each [`Case`] probes one behavior of the contact API and folds every
//! failure it meets into a [`CaseResult`]. The runner executes them in
//! [`Case::ALL`] order and gathers a [`RunReport`].

pub mod cases;
pub mod report;
pub mod runner;

use chrono::{DateTime, Local};
use serde::Serialize;

/// The checks run against the backend, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    HealthCheck,
    ContactFormValid,
    ContactFormValidation,
    GetContactMessages,
    CorsConfiguration,
}

impl Case {
    pub const ALL: [Case; 5] = [
        Case::HealthCheck,
        Case::ContactFormValid,
        Case::ContactFormValidation,
        Case::GetContactMessages,
        Case::CorsConfiguration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Case::HealthCheck => "health_check",
            Case::ContactFormValid => "contact_form_valid",
            Case::ContactFormValidation => "contact_form_validation",
            Case::GetContactMessages => "get_contact_messages",
            Case::CorsConfiguration => "cors_configuration",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Case::HealthCheck => "Health Check",
            Case::ContactFormValid => "Contact Form Valid",
            Case::ContactFormValidation => "Contact Form Validation",
            Case::GetContactMessages => "Get Contact Messages",
            Case::CorsConfiguration => "Cors Configuration",
        }
    }
}

/// Outcome of one validation sub-scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub status: Option<u16>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub name: &'static str,
    #[serde(skip)]
    pub title: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<ScenarioResult>,
}

impl CaseResult {
    pub fn pass(case: Case) -> Self {
        Self {
            name: case.name(),
            title: case.title(),
            passed: true,
            reason: None,
            scenarios: Vec::new(),
        }
    }

    pub fn fail(case: Case, reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: Some(reason.into()),
            ..Self::pass(case)
        }
    }

    /// Passes only when every sub-scenario passed.
    pub fn from_scenarios(case: Case, scenarios: Vec<ScenarioResult>) -> Self {
        let failed = scenarios.iter().filter(|s| !s.passed).count();
        let mut result = if failed == 0 {
            Self::pass(case)
        } else {
            Self::fail(
                case,
                format!("{failed} of {} scenarios failed", scenarios.len()),
            )
        };
        result.scenarios = scenarios;
        result
    }
}

/// Everything one invocation produced. Result order is execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub target: String,
    pub started_at: DateTime<Local>,
    pub duration_ms: u128,
    pub results: Vec<CaseResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_id: Option<String>,
}

impl RunReport {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

#[cfg(test)]
impl RunReport {
    pub fn result(&self, case: Case) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.name == case.name())
    }
}
