use std::time::Instant;

use chrono::Local;

use tracing::info;

use crate::environment::HarnessConfig;
use crate::error::CheckError;
use crate::http::client::ApiClient;

use super::{Case, CaseResult, RunReport, cases};

/// Runs every [`Case`] against one backend, one request at a time.
pub struct Harness {
    config: HarnessConfig,
    client: ApiClient,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self, CheckError> {
        let client = ApiClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Never stops early: a failing case is recorded and the next one runs.
    pub async fn run_all(&self) -> RunReport {
        let started = Instant::now();
        let started_at = Local::now();
        info!(target_url = %self.config.api_base_url(), "starting backend API checks");

        let mut report = RunReport {
            target: self.config.api_base_url(),
            started_at,
            ..Default::default()
        };

        for case in Case::ALL {
            info!(case = case.name(), "running {}", case.title());
            let result = self.run_case(case, &mut report.submitted_id).await;
            report.results.push(result);
        }

        report.duration_ms = started.elapsed().as_millis();
        info!(
            passed = report.passed_count(),
            total = report.total(),
            "finished backend API checks"
        );
        report
    }

    async fn run_case(&self, case: Case, submitted_id: &mut Option<String>) -> CaseResult {
        match case {
            Case::HealthCheck => cases::health_check(&self.client).await,
            Case::ContactFormValid => {
                let (result, id) = cases::contact_form_valid(&self.client).await;
                *submitted_id = id;
                result
            }
            Case::ContactFormValidation => cases::contact_form_validation(&self.client).await,
            Case::GetContactMessages => {
                cases::get_contact_messages(&self.client, submitted_id.as_deref()).await
            }
            Case::CorsConfiguration => {
                cases::cors_configuration(&self.client, &self.config.origin).await
            }
        }
    }
}
