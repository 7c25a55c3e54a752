//! Fixed names, ports and paths for the OpenFGA workload

use std::collections::BTreeMap;

/// Name of the workload container holding the OpenFGA process
pub const WORKLOAD_CONTAINER: &str = "openfga";

/// Name of the service in the supervisor's plan
pub const WORKLOAD_SERVICE: &str = "openfga";

/// OpenFGA HTTP API port
pub const OPENFGA_SERVER_HTTP_PORT: u16 = 8080;

/// OpenFGA gRPC API port
pub const OPENFGA_SERVER_GRPC_PORT: u16 = 8081;

/// Prometheus metrics endpoint port
pub const OPENFGA_METRICS_HTTP_PORT: u16 = 2112;

/// CA bundle the gRPC health probe verifies the server certificate against
pub const CA_BUNDLE_FILE: &str = "/etc/ssl/certs/ca-certificates.crt";

/// Names of the two health checks attached to the workload layer
pub const HTTP_CHECK: &str = "http-check";
pub const GRPC_CHECK: &str = "grpc-check";

/// Environment variables that switch the health checks to their TLS variants.
/// Only the literal value "true" enables TLS; anything else (including
/// absence) is treated as disabled.
pub const ENV_HTTP_TLS_ENABLED: &str = "OPENFGA_HTTP_TLS_ENABLED";
pub const ENV_GRPC_TLS_ENABLED: &str = "OPENFGA_GRPC_TLS_ENABLED";

/// Baseline process environment for the OpenFGA server.
///
/// Lowest-priority layer of the environment merge; every caller-supplied
/// source overrides these on key collision.
pub fn default_container_env() -> BTreeMap<String, String> {
    [
        ("OPENFGA_HTTP_ADDR", format!("0.0.0.0:{OPENFGA_SERVER_HTTP_PORT}")),
        ("OPENFGA_GRPC_ADDR", format!("0.0.0.0:{OPENFGA_SERVER_GRPC_PORT}")),
        ("OPENFGA_METRICS_ENABLED", "true".to_string()),
        ("OPENFGA_METRICS_ADDR", format!("0.0.0.0:{OPENFGA_METRICS_HTTP_PORT}")),
        ("OPENFGA_LOG_FORMAT", "json".to_string()),
        ("OPENFGA_PLAYGROUND_ENABLED", "false".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
