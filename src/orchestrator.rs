//! Capability contracts of the outer orchestration unit
//!
//! The orchestrator owns the control loop, the workload version ledger and
//! network exposure. This crate only notifies it; it never drives it.

#[derive(Debug, thiserror::Error)]
#[error("orchestrator call failed: {0}")]
pub struct OrchestratorError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
        }
    }
}

/// Upstream notification surface of the orchestration unit
pub trait Orchestrator {
    /// Record the workload's version in the orchestrator's ledger.
    fn set_workload_version(&self, version: &str) -> Result<(), OrchestratorError>;

    /// Declare a port as externally reachable. Idempotent.
    fn open_port(&self, protocol: Protocol, port: u16) -> Result<(), OrchestratorError>;
}

/// Opaque helper that asks the running workload for its version string
pub trait VersionSource {
    /// `None` when the workload is unreachable or reports no version.
    fn workload_version(&self) -> Option<String>;
}
