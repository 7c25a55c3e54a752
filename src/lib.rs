//! openfga-lifecycle - Workload lifecycle management for a supervised OpenFGA server
//!
//! Manages a single long-running OpenFGA process inside a supervised container:
//! - Builds a declarative service layer from layered environment inputs
//! - Converges the supervisor's running state to the layer with the least
//!   disruptive transition (start / restart / replan)
//! - Reports the workload's running state and version upstream
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               openfga-lifecycle                  │
//! ├────────────────────────┬────────────────────────┤
//! │    Layer Reconciler    │     Status Reporter    │
//! ├────────────────────────┴────────────────────────┤
//! │   Supervisor / Orchestrator capability traits    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The supervisor (process manager), the orchestrator (outer control loop) and
//! the version helper are external collaborators injected through the traits
//! in [`supervisor`] and [`orchestrator`].

pub mod constants;
pub mod env;
pub mod layer;
pub mod orchestrator;
pub mod reconciler;
pub mod status;
pub mod supervisor;

pub use env::EnvVarSource;
pub use layer::{Check, CheckLevel, ExecProbe, HttpProbe, Layer, Override, Probe, ServiceSpec, Startup};
pub use orchestrator::{Orchestrator, OrchestratorError, Protocol, VersionSource};
pub use reconciler::{LayerReconciler, ReconcileError};
pub use status::StatusReporter;
pub use supervisor::{ServiceInfo, ServiceStatus, Supervisor, SupervisorError};
