//! The declarative service layer submitted to the supervisor
//!
//! A layer declares services and health checks. Layers are mergeable: the
//! supervisor combines them with whatever other layers it already holds, so a
//! layer only ever describes the services it owns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a layer entry combines with an entry of the same name in other layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Override {
    /// Merge field-by-field into the existing definition
    Merge,
    /// Discard the existing definition entirely
    Replace,
}

/// Whether the supervisor starts the service on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Startup {
    Enabled,
    Disabled,
}

/// Severity of a failing check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    Alive,
    Ready,
}

/// HTTP GET probe; healthy on a 2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProbe {
    pub url: String,
}

/// Executable probe; healthy on exit code 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecProbe {
    pub command: String,
}

impl ExecProbe {
    /// Split the command string into argv, shell-style.
    /// Returns `None` if the string has unbalanced quoting.
    pub fn argv(&self) -> Option<Vec<String>> {
        shlex::split(&self.command)
    }
}

/// The probe a check runs, keyed by kind on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    Http(HttpProbe),
    Exec(ExecProbe),
}

/// A named health check attached to the layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    #[serde(rename = "override")]
    pub override_: Override,
    /// Probe period, supervisor duration syntax (e.g. "1m")
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CheckLevel>,
    #[serde(flatten)]
    pub probe: Probe,
}

/// A service definition within the layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(rename = "override")]
    pub override_: Override,
    pub summary: String,
    /// Invocation string for the workload process
    pub command: String,
    pub startup: Startup,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

/// Complete layer document.
///
/// Maps are ordered so that equal layers serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub summary: String,
    pub description: String,
    pub services: BTreeMap<String, ServiceSpec>,
    pub checks: BTreeMap<String, Check>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_check() -> Check {
        Check {
            override_: Override::Replace,
            period: "1m".to_string(),
            level: None,
            probe: Probe::Http(HttpProbe {
                url: "http://127.0.0.1:8080/healthz".to_string(),
            }),
        }
    }

    #[test]
    fn check_serializes_with_probe_kind_key() {
        let value = serde_json::to_value(http_check()).unwrap();
        assert_eq!(value["override"], "replace");
        assert_eq!(value["period"], "1m");
        assert_eq!(value["http"]["url"], "http://127.0.0.1:8080/healthz");
        assert!(value.get("level").is_none());
    }

    #[test]
    fn exec_check_carries_level() {
        let check = Check {
            override_: Override::Replace,
            period: "1m".to_string(),
            level: Some(CheckLevel::Alive),
            probe: Probe::Exec(ExecProbe {
                command: "grpc_health_probe -addr 127.0.0.1:8081".to_string(),
            }),
        };
        let value = serde_json::to_value(&check).unwrap();
        assert_eq!(value["level"], "alive");
        assert_eq!(value["exec"]["command"], "grpc_health_probe -addr 127.0.0.1:8081");
    }

    #[test]
    fn check_roundtrip() {
        let check = http_check();
        let encoded = serde_json::to_string(&check).unwrap();
        let decoded: Check = serde_json::from_str(&encoded).unwrap();
        assert_eq!(check, decoded);
    }

    #[test]
    fn exec_probe_argv_splits_flags() {
        let probe = ExecProbe {
            command: "grpc_health_probe -addr 127.0.0.1:8081 -tls -tls-ca-cert /etc/ssl/certs/ca-certificates.crt"
                .to_string(),
        };
        let argv = probe.argv().unwrap();
        assert_eq!(argv[0], "grpc_health_probe");
        assert_eq!(argv.len(), 6);
    }

    #[test]
    fn exec_probe_argv_rejects_unbalanced_quotes() {
        let probe = ExecProbe {
            command: "sh -c 'unterminated".to_string(),
        };
        assert!(probe.argv().is_none());
    }

    #[test]
    fn service_spec_skips_empty_environment() {
        let spec = ServiceSpec {
            override_: Override::Merge,
            summary: "entrypoint".to_string(),
            command: "openfga run".to_string(),
            startup: Startup::Disabled,
            environment: BTreeMap::new(),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["override"], "merge");
        assert_eq!(value["startup"], "disabled");
        assert!(value.get("environment").is_none());
    }
}
