//! Capability contract of the process supervisor
//!
//! The supervisor accepts declarative layers, manages the OS processes they
//! describe and runs their health checks. This crate only consumes the
//! contract; the implementation lives with the container runtime.

use crate::layer::{Layer, Startup};

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("service {0} not found in the supervisor plan")]
    NotFound(String),

    #[error("{op} failed: {reason}")]
    Operation { op: &'static str, reason: String },
}

/// Run state of a service as reported by the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Inactive,
    Active,
    Backoff,
    Error,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Backoff => "backoff",
            Self::Error => "error",
        }
    }
}

/// Snapshot of one service in the supervisor's plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub startup: Startup,
    pub current: ServiceStatus,
}

impl ServiceInfo {
    pub fn is_running(&self) -> bool {
        self.current == ServiceStatus::Active
    }
}

/// Operations the supervisor exposes to this crate.
///
/// All calls block; timeout and retry policy belong to the supervisor or the
/// outer control loop, never here.
pub trait Supervisor {
    /// Look up a service by name. Absence is [`SupervisorError::NotFound`].
    fn get_service(&self, name: &str) -> Result<ServiceInfo, SupervisorError>;

    /// Submit a layer under `label`. With `combine` the layer merges into an
    /// existing layer of the same label instead of replacing it.
    fn add_layer(&self, label: &str, layer: &Layer, combine: bool) -> Result<(), SupervisorError>;

    fn start(&self, name: &str) -> Result<(), SupervisorError>;

    fn restart(&self, name: &str) -> Result<(), SupervisorError>;

    /// Re-derive the effective plan from all layers and reconcile running
    /// processes to it, restarting only what actually changed.
    fn replan(&self) -> Result<(), SupervisorError>;
}
