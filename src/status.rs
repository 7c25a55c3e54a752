//! Workload status reporting
//!
//! A live view over supervisor state, recomputed per query. Failures on this
//! path degrade to "unknown" instead of aborting the caller: version lookups
//! fall back to an empty string and ledger publication failures are logged
//! and swallowed.

use crate::constants::{
    OPENFGA_METRICS_HTTP_PORT, OPENFGA_SERVER_GRPC_PORT, OPENFGA_SERVER_HTTP_PORT,
    WORKLOAD_SERVICE,
};
use crate::orchestrator::{Orchestrator, OrchestratorError, Protocol, VersionSource};
use crate::supervisor::Supervisor;

/// Reports the workload's running state and version to the orchestrator.
pub struct StatusReporter<'a> {
    supervisor: &'a dyn Supervisor,
    orchestrator: &'a dyn Orchestrator,
    version_source: &'a dyn VersionSource,
    version: String,
}

impl<'a> StatusReporter<'a> {
    pub fn new(
        supervisor: &'a dyn Supervisor,
        orchestrator: &'a dyn Orchestrator,
        version_source: &'a dyn VersionSource,
    ) -> Self {
        Self {
            supervisor,
            orchestrator,
            version_source,
            version: String::new(),
        }
    }

    /// Query the workload for its version. Empty string when unavailable.
    ///
    /// The last non-empty observation is retained so a transient lookup
    /// failure never regresses [`last_version`](Self::last_version).
    pub fn version(&mut self) -> String {
        let fresh = self.version_source.workload_version().unwrap_or_default();
        if !fresh.is_empty() {
            self.version = fresh.clone();
        }
        fresh
    }

    /// Last non-empty version observed or published, empty if none yet.
    pub fn last_version(&self) -> &str {
        &self.version
    }

    /// Publish `version` to the orchestrator's ledger.
    ///
    /// Empty versions are ignored so a failed lookup never clobbers a known
    /// version. A ledger failure is logged and swallowed; the in-memory
    /// version still updates so local state stays consistent while upstream
    /// reporting is degraded.
    pub fn set_version(&mut self, version: &str) {
        if version.is_empty() {
            return;
        }

        if let Err(e) = self.orchestrator.set_workload_version(version) {
            log::error!("Failed to set workload version: {}", e);
        }

        self.version = version.to_string();
    }

    /// Whether the workload service is running. A service absent from the
    /// supervisor's plan is reported as not running, never as an error.
    pub fn is_running(&self) -> bool {
        match self.supervisor.get_service(WORKLOAD_SERVICE) {
            Ok(service) => service.is_running(),
            Err(e) => {
                log::debug!("Service lookup failed, reporting not running: {}", e);
                false
            }
        }
    }

    /// Declare the HTTP API, gRPC API and metrics ports as reachable.
    pub fn open_ports(&self) -> Result<(), OrchestratorError> {
        for port in [
            OPENFGA_SERVER_HTTP_PORT,
            OPENFGA_SERVER_GRPC_PORT,
            OPENFGA_METRICS_HTTP_PORT,
        ] {
            self.orchestrator.open_port(Protocol::Tcp, port)?;
        }
        Ok(())
    }
}
