pub mod carryover;
pub mod log;
pub mod oplog;
pub mod status;
pub mod track;

use serde::Serialize;
use tracing::warn;

use crate::error::VaultError;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

/// Fold a scenario error into the report. Missing sources are a normal no-op,
/// I/O and directory problems fail the scenario, anything else propagates.
pub fn record_failure(report: &mut CommandReport, err: VaultError) -> anyhow::Result<()> {
    match err {
        VaultError::MissingSourceFile(ref dir) => {
            warn!(dir = %dir.display(), "nothing to process");
            report.detail(format!("no-op: {err}"));
            Ok(())
        }
        ref scenario if scenario.is_scenario_failure() => {
            warn!(error = %scenario, "scenario aborted");
            report.issue(scenario.to_string());
            Ok(())
        }
        other => Err(other.into()),
    }
}
