//! Layer reconciliation
//!
//! Builds the desired service layer from merged environment sources and
//! converges the supervisor's run state to it with the least disruptive
//! transition:
//!
//! ```text
//!   restart forced ──────────▶ restart
//!   service not running ─────▶ start
//!   otherwise ───────────────▶ replan
//! ```
//!
//! The layer is rebuilt in full from the static template on every render, so
//! rendering is a pure function of the inputs: flipping a TLS flag back off
//! reverts the matching health check to its plaintext form.

use std::collections::BTreeMap;

use crate::constants::{
    default_container_env, CA_BUNDLE_FILE, ENV_GRPC_TLS_ENABLED, ENV_HTTP_TLS_ENABLED,
    GRPC_CHECK, HTTP_CHECK, OPENFGA_SERVER_GRPC_PORT, OPENFGA_SERVER_HTTP_PORT,
    WORKLOAD_SERVICE,
};
use crate::env::{merge_env, EnvVarSource};
use crate::layer::{
    Check, CheckLevel, ExecProbe, HttpProbe, Layer, Override, Probe, ServiceSpec, Startup,
};
use crate::supervisor::{Supervisor, SupervisorError};

/// The supervisor rejected the layer or the transition applying it failed.
/// Never retried here; retry policy belongs to the outer control loop.
#[derive(Debug, thiserror::Error)]
#[error("supervisor failed to apply the workload service layer: {source}")]
pub struct ReconcileError {
    #[from]
    source: SupervisorError,
}

/// Renders the workload layer and applies it to the supervisor.
pub struct LayerReconciler<'a> {
    supervisor: &'a dyn Supervisor,
    defaults: BTreeMap<String, String>,
}

impl<'a> LayerReconciler<'a> {
    pub fn new(supervisor: &'a dyn Supervisor) -> Self {
        Self::with_defaults(supervisor, default_container_env())
    }

    /// Use a caller-provided baseline environment instead of
    /// [`default_container_env`].
    pub fn with_defaults(
        supervisor: &'a dyn Supervisor,
        defaults: BTreeMap<String, String>,
    ) -> Self {
        Self {
            supervisor,
            defaults,
        }
    }

    /// Build the desired layer from the environment sources.
    ///
    /// Earlier sources win on key collision (see [`merge_env`]). The health
    /// checks switch to their TLS variants when the merged environment sets
    /// the matching `*_TLS_ENABLED` variable to the literal `"true"`.
    pub fn render(&self, sources: &[&dyn EnvVarSource]) -> Layer {
        let env = merge_env(&self.defaults, sources);

        let http_tls = env.get(ENV_HTTP_TLS_ENABLED).map(String::as_str) == Some("true");
        let grpc_tls = env.get(ENV_GRPC_TLS_ENABLED).map(String::as_str) == Some("true");
        log::debug!(
            "Rendered layer for {}: {} env vars, http_tls={}, grpc_tls={}",
            WORKLOAD_SERVICE,
            env.len(),
            http_tls,
            grpc_tls
        );

        workload_layer(env, http_tls, grpc_tls)
    }

    /// Submit `layer` to the supervisor and converge the service's run state.
    ///
    /// The layer combines with any layers the supervisor holds for unrelated
    /// services. With `restart` the service is restarted unconditionally
    /// (e.g. after certificate rotation); otherwise a stopped service is
    /// started and a running one replanned.
    pub fn apply(&self, layer: &Layer, restart: bool) -> Result<(), ReconcileError> {
        self.supervisor.add_layer(WORKLOAD_SERVICE, layer, true)?;

        if restart {
            log::info!("Restarting {}", WORKLOAD_SERVICE);
            self.supervisor.restart(WORKLOAD_SERVICE)?;
        } else if !self.supervisor.get_service(WORKLOAD_SERVICE)?.is_running() {
            log::info!("Starting {}", WORKLOAD_SERVICE);
            self.supervisor.start(WORKLOAD_SERVICE)?;
        } else {
            log::info!("Replanning {}", WORKLOAD_SERVICE);
            self.supervisor.replan()?;
        }

        Ok(())
    }
}

/// Static layer template, instantiated with the resolved environment and
/// check schemes.
fn workload_layer(env: BTreeMap<String, String>, http_tls: bool, grpc_tls: bool) -> Layer {
    let http_scheme = if http_tls { "https" } else { "http" };
    let mut probe_command =
        format!("grpc_health_probe -addr 127.0.0.1:{OPENFGA_SERVER_GRPC_PORT}");
    if grpc_tls {
        probe_command.push_str(&format!(" -tls -tls-ca-cert {CA_BUNDLE_FILE}"));
    }

    let service = ServiceSpec {
        override_: Override::Merge,
        summary: "entrypoint of the openfga image".to_string(),
        command: "openfga run".to_string(),
        startup: Startup::Disabled,
        environment: env,
    };

    let http_check = Check {
        override_: Override::Replace,
        period: "1m".to_string(),
        level: None,
        probe: Probe::Http(HttpProbe {
            url: format!("{http_scheme}://127.0.0.1:{OPENFGA_SERVER_HTTP_PORT}/healthz"),
        }),
    };

    let grpc_check = Check {
        override_: Override::Replace,
        period: "1m".to_string(),
        level: Some(CheckLevel::Alive),
        probe: Probe::Exec(ExecProbe {
            command: probe_command,
        }),
    };

    Layer {
        summary: "openfga layer".to_string(),
        description: "pebble layer for openfga".to_string(),
        services: [(WORKLOAD_SERVICE.to_string(), service)].into(),
        checks: [
            (HTTP_CHECK.to_string(), http_check),
            (GRPC_CHECK.to_string(), grpc_check),
        ]
        .into(),
    }
}
