use super::*;
use crate::model_api::{FetchError, HealthStatus};

impl ConsoleController {
    /// Ping `/health` in the background and report the result on the status bar.
    pub fn check_service_health(&mut self) {
        if self.jobs.health_check_in_progress() {
            return;
        }
        self.ui.health = ServiceHealth::Checking;
        self.jobs.begin_health_check();
    }

    pub(super) fn apply_health_result(&mut self, result: Result<HealthStatus, FetchError>) {
        self.jobs.clear_health_check();
        match result {
            Ok(status) if status.is_ok() => {
                self.ui.health = ServiceHealth::Online;
                self.set_health_status("Service online", StatusTone::Info);
            }
            Ok(status) => {
                let detail = format!("status {:?}", status.status);
                self.report_unreachable(detail);
            }
            Err(err) => self.report_unreachable(err.to_string()),
        }
    }

    fn report_unreachable(&mut self, detail: String) {
        tracing::warn!("Health check failed: {detail}");
        self.set_health_status(format!("Service unreachable: {detail}"), StatusTone::Warning);
        self.ui.health = ServiceHealth::Unreachable(detail);
    }

    // The top bar always shows health; the status bar belongs to a pending predict.
    fn set_health_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        if self.ui.prediction.is_pending() {
            return;
        }
        self.set_status(text, tone);
    }
}
